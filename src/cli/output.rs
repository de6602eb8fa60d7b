use crate::{Category, CorrectionResult};
use colored::*;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Character-based extraction of a finding's span from the original text.
pub fn span_text(text: &str, offset: usize, length: usize) -> String {
    text.chars().skip(offset).take(length).collect()
}

pub fn print_result(result: &CorrectionResult, colored_output: bool, format: &OutputFormat) {
    match format {
        OutputFormat::Text => print_text_result(result, colored_output),
        OutputFormat::Json => print_json_result(result),
    }
}

fn category_label(category: Category, colored_output: bool) -> String {
    let label = match category {
        Category::Spelling => "orthographe",
        Category::Grammar => "grammaire",
        Category::Style => "style",
    };
    if !colored_output {
        return label.to_string();
    }
    match category {
        Category::Spelling => label.red().to_string(),
        Category::Grammar => label.yellow().to_string(),
        Category::Style => label.blue().to_string(),
    }
}

fn print_text_result(result: &CorrectionResult, colored_output: bool) {
    for finding in &result.corrections {
        let flagged = span_text(&result.text, finding.offset, finding.length);
        let position = format!("{}:{}", finding.offset, finding.length);

        if colored_output {
            println!(
                "{} [{}] {} {}",
                position.dimmed(),
                category_label(finding.category, true),
                format!("« {} »", flagged).bold(),
                finding.message
            );
        } else {
            println!(
                "{} [{}] « {} » {}",
                position,
                category_label(finding.category, false),
                flagged,
                finding.message
            );
        }

        if !finding.suggestions.is_empty() {
            let joined = finding.suggestions.join(", ");
            if colored_output {
                println!("    suggestions: {}", joined.cyan());
            } else {
                println!("    suggestions: {}", joined);
            }
        }
    }

    let score_line = format!("Score: {}/100", result.score);
    if colored_output {
        let styled = if result.score > 90 {
            score_line.green().bold()
        } else if result.score > 70 {
            score_line.yellow().bold()
        } else {
            score_line.red().bold()
        };
        println!("\n{} ({} corrections)", styled, result.corrections.len());
    } else {
        println!("\n{} ({} corrections)", score_line, result.corrections.len());
    }
}

fn print_json_result(result: &CorrectionResult) {
    match serde_json::to_string_pretty(result) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize result: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parsing() {
        assert!(matches!("text".parse(), Ok(OutputFormat::Text)));
        assert!(matches!("JSON".parse(), Ok(OutputFormat::Json)));
        assert!("csv".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_span_text_counts_characters() {
        assert_eq!(span_text("Je suis allé", 8, 4), "allé");
        assert_eq!(span_text("détendre", 0, 2), "dé");
        assert_eq!(span_text("abc", 10, 2), "");
    }
}
