//! Catalog post-processing for documentation output.
use regex::Regex;

use crate::error::Result;
use crate::field::Field;

/// Decode catalog JSON; errors name the offending JSON path.
pub fn load_catalog(src: &str) -> Result<Vec<Field>> {
    crate::path_de::from_str_with_path(src)
}

/// Keep fields whose `name` matches `pattern` (unanchored), in catalog order.
pub fn filter_by_name(fields: Vec<Field>, pattern: &str) -> Result<Vec<Field>> {
    let rx = Regex::new(pattern)?;
    Ok(fields.into_iter().filter(|f| rx.is_match(&f.name)).collect())
}

/// One Markdown table, header first, rows in catalog order.
pub fn markdown(fields: &[Field]) -> String {
    let mut out = String::from("| name | type | default | description |\n|---|---|---|---|\n");
    for f in fields {
        out.push_str(&format!(
            "| {} | {} | {} | {} |\n",
            cell(&f.name),
            cell(&f.type_),
            cell(&f.default),
            cell(&f.description),
        ));
    }
    out
}

fn cell(s: &str) -> String {
    s.replace('|', "\\|").replace('\n', " ")
}
