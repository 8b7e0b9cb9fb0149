use crate::errors::AppError;
use crate::resume::ResumeData;

/// Lines of context kept on each side of a matching line.
const CONTEXT_LINES: usize = 2;

/// Finds every line containing `query` (case-insensitive) and returns one
/// fragment per hit: the section it was found in plus surrounding lines, the
/// hit itself marked with `>>> `.
pub fn search_resume(data: &ResumeData, query: &str) -> Result<Vec<String>, AppError> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Err(AppError::Validation("Please enter a search term.".to_string()));
    }
    if data.full_text.is_empty() {
        return Err(AppError::Validation(
            "Please upload a resume first.".to_string(),
        ));
    }

    let mut results = Vec::new();
    for (section, text) in data.sections.iter() {
        let lines: Vec<&str> = text.split('\n').collect();
        for (i, line) in lines.iter().enumerate() {
            if line.to_lowercase().contains(&query) {
                results.push(format!(
                    "Found in {section}:\n{}\n",
                    context_around(&lines, i)
                ));
            }
        }
    }

    if results.is_empty() {
        results.push(format!("No results found for '{query}'"));
    }
    Ok(results)
}

fn context_around(lines: &[&str], index: usize) -> String {
    let start = index.saturating_sub(CONTEXT_LINES);
    let end = (index + CONTEXT_LINES + 1).min(lines.len());

    (start..end)
        .filter(|&i| !lines[i].trim().is_empty())
        .map(|i| {
            let prefix = if i == index { ">>> " } else { "    " };
            format!("{prefix}{}", lines[i])
        })
        .collect::<Vec<_>>()
        .join("\n")
}
