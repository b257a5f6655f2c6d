use super::text::{render_column_names, render_recurrent, render_summary, render_unique_genes};
use super::*;

#[test]
fn test_unique_in_order() {
    let v = ["G2", "G1", "G2", "G3", "G1"];
    assert_eq!(unique_in_order(v), vec!["G2", "G1", "G3"]);
}

#[test]
fn test_top_recurrent_orders_by_count_then_first_seen() {
    let v = ["B", "A", "C", "A", "B", "D", "A"];
    let top = top_recurrent(v, 5);
    assert_eq!(top, vec![("A", 3), ("B", 2), ("C", 1), ("D", 1)]);
}

#[test]
fn test_top_recurrent_truncates() {
    let v = ["A", "B", "C", "D", "E", "F", "F"];
    let top = top_recurrent(v, TOP_RECURRENT);
    assert_eq!(top.len(), 5);
    assert_eq!(top[0], ("F", 2));
    assert_eq!(top[4], ("D", 1));
    for pair in top.windows(2) {
        assert!(pair[0].1 >= pair[1].1);
    }
}

#[test]
fn test_top_recurrent_empty() {
    let v: [&str; 0] = [];
    assert!(top_recurrent(v, 5).is_empty());
    assert_eq!(render_recurrent(&[]), "");
}

#[test]
fn test_mean_of_column() {
    assert_eq!(mean_of_column("x", &["10", "20", "30"]).unwrap(), 20.0);
    assert_eq!(mean_of_column("x", &["10", "", "30"]).unwrap(), 20.0);
    assert!(matches!(
        mean_of_column("x", &["", " "]),
        Err(ReportError::EmptyColumn(_))
    ));
    match mean_of_column("x", &["10", "n/a"]) {
        Err(ReportError::InvalidNumber { row, value, .. }) => {
            assert_eq!(row, 2);
            assert_eq!(value, "n/a");
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn test_round_and_format() {
    assert_eq!(format_decimal(round2(20.0)), "20.0");
    assert_eq!(format_decimal(round2(61.0 / 3.0)), "20.33");
    assert_eq!(format_decimal(round2(2.0 / 3.0)), "0.67");
    assert_eq!(format_decimal(round2(12.5)), "12.5");
}

#[test]
fn test_render_strings() {
    assert_eq!(
        render_summary("ssm.tsv", 3, 2),
        "SSM file 'ssm.tsv' has 3 rows and 2 columns."
    );
    assert_eq!(
        render_column_names(&["a".to_string(), "b".to_string()]),
        "The column names in the SSM file are: a, b"
    );
    assert_eq!(
        render_unique_genes("Ensembl", &["G1", "G2"]),
        "The unique Ensembl genes are:\nG1\nG2"
    );
    assert_eq!(render_recurrent(&[("G1", 2), ("G2", 1)]), "G1 : 2, G2 : 1");
}

#[test]
fn test_mean_skips_na_tokens() {
    assert_eq!(mean_of_column("x", &["10", "nan", "20"]).unwrap(), 15.0);
    assert_eq!(mean_of_column("x", &["10", "NA", " N/A ", "null", "20"]).unwrap(), 15.0);
    assert!(matches!(
        mean_of_column("x", &["NaN", "NA"]),
        Err(ReportError::EmptyColumn(_))
    ));
}

#[test]
fn test_mean_rejects_non_finite() {
    for bad in ["inf", "-inf", "infinity"] {
        match mean_of_column("x", &["10", bad]) {
            Err(ReportError::InvalidNumber { row, value, .. }) => {
                assert_eq!(row, 2);
                assert_eq!(value, bad);
            }
            other => panic!("unexpected for {bad}: {other:?}"),
        }
    }
}

#[test]
fn test_format_decimal_exponent_form() {
    assert_eq!(format_decimal(1e16), "1e+16");
    assert_eq!(format_decimal(1.5e16), "1.5e+16");
    assert_eq!(format_decimal(-2e17), "-2e+17");
    assert_eq!(format_decimal(1e15), "1000000000000000.0");
    assert_eq!(format_decimal(0.00001), "1e-05");
    assert_eq!(format_decimal(0.0001), "0.0001");
    assert_eq!(format_decimal(0.0), "0.0");
}
