use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use flate2::Compression;
use flate2::write::GzEncoder;

use super::{InputError, is_missing, load_ssm, parse_ssm, resolve_path};

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn make_temp_dir() -> PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!("kira_ssmqc_input_test_{}_{}", std::process::id(), id));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_file(path: &Path, contents: &str) {
    let mut f = BufWriter::new(File::create(path).unwrap());
    f.write_all(contents.as_bytes()).unwrap();
}

fn write_gz(path: &Path, contents: &str) {
    let mut enc = GzEncoder::new(File::create(path).unwrap(), Compression::default());
    enc.write_all(contents.as_bytes()).unwrap();
    enc.finish().unwrap();
}

const SSM: &str = "icgc_mutation_id\tgene_affected\ttotal_read_count\n\
MU1\tENSG00000141510\t10\n\
MU2\tENSG00000141510\t30\n\
MU3\tENSG00000146648\t20\n";

#[test]
fn test_load_ssm_shape() {
    let dir = make_temp_dir();
    write_file(&dir.join("ssm.tsv"), SSM);

    let table = load_ssm(&dir, "ssm.tsv").unwrap();
    assert_eq!(table.n_rows(), 3);
    assert_eq!(table.n_columns(), 3);
    assert_eq!(
        table.columns,
        vec!["icgc_mutation_id", "gene_affected", "total_read_count"]
    );
    assert_eq!(table.rows[2], vec!["MU3", "ENSG00000146648", "20"]);
}

#[test]
fn test_load_ssm_gz() {
    let dir = make_temp_dir();
    write_gz(&dir.join("ssm.tsv.gz"), SSM);

    let table = load_ssm(&dir, "ssm.tsv.gz").unwrap();
    assert_eq!(table.n_rows(), 3);
    assert_eq!(table.column("gene_affected").unwrap()[0], "ENSG00000141510");
}

#[test]
fn test_missing_file() {
    let dir = make_temp_dir();
    let err = load_ssm(&dir, "absent.tsv").unwrap_err();
    assert!(matches!(err, InputError::FileNotFound(p) if p.ends_with("absent.tsv")));
}

#[test]
fn test_inconsistent_field_count_is_parse_error() {
    let data = "a\tb\n1\t2\n3\t4\t5\n";
    let err = parse_ssm(data.as_bytes(), "bad.tsv").unwrap_err();
    match err {
        InputError::Parse(msg) => assert!(msg.contains("bad.tsv"), "{msg}"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_empty_file_is_parse_error() {
    let err = parse_ssm("".as_bytes(), "empty.tsv").unwrap_err();
    assert!(matches!(err, InputError::Parse(_)));
}

#[test]
fn test_header_only_has_zero_rows() {
    let table = parse_ssm("gene_affected\ttotal_read_count\n".as_bytes(), "h.tsv").unwrap();
    assert_eq!(table.n_rows(), 0);
    assert_eq!(table.n_columns(), 2);
}

#[test]
fn test_missing_column() {
    let table = parse_ssm("a\tb\n1\t2\n".as_bytes(), "x.tsv").unwrap();
    let err = table.column("gene_affected").unwrap_err();
    assert!(matches!(err, InputError::MissingColumn(c) if c == "gene_affected"));
}

#[test]
fn test_resolve_path_rejects_escape() {
    let base = Path::new("/srv/data");
    assert_eq!(
        resolve_path(base, "ssm.tsv").unwrap(),
        PathBuf::from("/srv/data/ssm.tsv")
    );
    assert_eq!(
        resolve_path(base, "cohort/ssm.tsv").unwrap(),
        PathBuf::from("/srv/data/cohort/ssm.tsv")
    );
    assert!(matches!(
        resolve_path(base, "../etc/passwd"),
        Err(InputError::InvalidFileName(_))
    ));
    assert!(matches!(
        resolve_path(base, "/etc/passwd"),
        Err(InputError::InvalidFileName(_))
    ));
    assert!(matches!(
        resolve_path(base, "  "),
        Err(InputError::InvalidFileName(_))
    ));
}

#[test]
fn test_is_missing_tokens() {
    for v in ["", "  ", "NA", "N/A", "NaN", "nan", "null", "NULL", "<NA>", "None"] {
        assert!(is_missing(v), "{v:?}");
    }
    for v in ["0", "G1", "ENSG00000141510", "inf", "na"] {
        assert!(!is_missing(v), "{v:?}");
    }
}
