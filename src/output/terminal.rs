// Colored terminal output for frequency listings and fit summaries.
//
// The listing lines themselves are plain (no color) so they can be piped and
// diffed; headers, summaries, and warnings are colored.

use colored::Colorize;

use crate::fit::powerlaw::{FitError, FitResult};
use crate::frequency::distribution::CountDistribution;
use crate::frequency::tables::{FrequencyTables, RankedToken};

use super::format_listing_line;

/// Print the ranked listing, optionally limited to the top `limit` tokens.
pub fn display_listing(tables: &FrequencyTables, limit: Option<usize>) {
    let ranked = tables.ranked();
    if ranked.is_empty() {
        println!("No tokens found. Every document was empty after normalization.");
        return;
    }

    let shown = limit.unwrap_or(ranked.len()).min(ranked.len());
    eprintln!(
        "{}",
        format!(
            "=== Word frequencies ({} of {} distinct tokens, {} total) ===",
            shown,
            ranked.len(),
            tables.total.token_count()
        )
        .bold()
    );

    for row in ranked.iter().take(shown) {
        println!("{}", format_listing_line(row));
    }
}

/// Print one token's total and per-document breakdown.
pub fn display_word(query: &str, row: Option<RankedToken<'_>>) {
    match row {
        Some(row) => {
            println!(
                "{} occurs {} times in {} documents",
                row.token.bold(),
                row.total,
                row.documents.len()
            );
            println!("{}", format_listing_line(&row));
        }
        None => println!("{} does not occur in the corpus", query.bold()),
    }
}

/// Print the count-of-counts table.
pub fn display_distribution(distribution: &CountDistribution) {
    println!("\n{}", "=== Count distribution ===".bold());
    println!("  {:>8}  {:>8}", "Count".dimmed(), "Tokens".dimmed());
    println!("  {}", "-".repeat(18).dimmed());
    for (frequency, tokens) in distribution.iter() {
        println!("  {frequency:>8}  {tokens:>8}");
    }
}

/// Print the fitted coefficients, or a warning if the fit failed.
pub fn display_fit(fit: &Result<FitResult, FitError>) {
    match fit {
        Ok(fit) => {
            let (sigma_a, sigma_b) = fit.standard_errors();
            println!("\n{}", "=== Power-law fit: y = a x^b ===".bold());
            println!("  a = {:8.3}  (± {})", fit.a, format_sigma(sigma_a));
            println!("  b = {:8.3}  (± {})", fit.b, format_sigma(sigma_b));
            println!(
                "  {}",
                format!(
                    "residual SS {:.3} after {} iterations",
                    fit.residual_sum_of_squares, fit.iterations
                )
                .dimmed()
            );
            if fit.b >= 0.0 {
                println!(
                    "  {} exponent is not negative; the distribution does not decay like a power law",
                    "Warning:".yellow()
                );
            }
        }
        Err(e) => {
            println!("\n{} {}", "Power-law fit unavailable:".yellow(), e);
            println!("  {}", "Frequency tables above are complete; plots were skipped.".dimmed());
        }
    }
}

fn format_sigma(sigma: f64) -> String {
    if sigma.is_finite() {
        format!("{sigma:.3}")
    } else {
        "undetermined".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sigma_formatting() {
        assert_eq!(format_sigma(0.12345), "0.123");
        assert_eq!(format_sigma(f64::INFINITY), "undetermined");
        assert_eq!(format_sigma(f64::NAN), "undetermined");
    }
}
