// Output formatting — console listing, JSON export, and fit plots.

pub mod json;
pub mod plots;
pub mod terminal;

use crate::frequency::tables::RankedToken;

/// Format one listing line: `<token> ->[doc, count]->[doc, count]...`
pub fn format_listing_line(row: &RankedToken<'_>) -> String {
    let mut line = String::from(row.token);
    line.push(' ');
    for entry in row.documents {
        line.push_str("->");
        line.push_str(&entry.to_string());
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frequency::tables::DocumentCount;

    #[test]
    fn listing_line_format() {
        let docs = [
            DocumentCount { document: 1, count: 2 },
            DocumentCount { document: 2, count: 1 },
        ];
        let row = RankedToken {
            token: "dog",
            total: 3,
            documents: &docs,
        };
        assert_eq!(format_listing_line(&row), "dog ->[1, 2]->[2, 1]");
    }
}
