use crate::report::format_decimal;

pub fn render_summary(filename: &str, n_rows: usize, n_columns: usize) -> String {
    format!(
        "SSM file '{}' has {} rows and {} columns.",
        filename, n_rows, n_columns
    )
}

pub fn render_column_names(columns: &[String]) -> String {
    format!(
        "The column names in the SSM file are: {}",
        columns.join(", ")
    )
}

pub fn render_unique_genes(namespace: &str, genes: &[&str]) -> String {
    format!("The unique {} genes are:\n{}", namespace, genes.join("\n"))
}

pub fn render_recurrent(counts: &[(&str, usize)]) -> String {
    let mut parts = Vec::with_capacity(counts.len());
    for (gene, count) in counts {
        parts.push(format!("{} : {}", gene, count));
    }
    parts.join(", ")
}

pub fn render_average_read_count(mean: f64) -> String {
    format!("The average total read count is: {}", format_decimal(mean))
}
