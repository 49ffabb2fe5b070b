use kgtk_io::{FileKind, FileMode, KgtkIoError, ReaderOptions, RowSource, TsvReader};
use pretty_assertions::assert_eq;

fn read_all(
    input: &str,
    mode: FileMode,
) -> Result<(TsvReader<&[u8]>, Vec<Vec<String>>), KgtkIoError> {
    let mut reader = TsvReader::new(input.as_bytes(), &ReaderOptions { mode })?;
    let rows = reader.by_ref().collect::<Result<Vec<_>, _>>()?;
    Ok((reader, rows))
}

fn row(cells: &[&str]) -> Vec<String> {
    cells.iter().map(|c| c.to_string()).collect()
}

#[test]
fn reads_edge_file_and_skips_comments_and_blank_lines() {
    let input = "node1\tlabel\tnode2\tweight\n# a comment\nA\tp\tX\t1\n\nB\tq\tY\t\n";
    let (reader, rows) = read_all(input, FileMode::Auto).unwrap();

    assert_eq!(
        reader.header().kind(),
        FileKind::Edge {
            node1: 0,
            label: 1,
            node2: 2
        }
    );
    assert_eq!(reader.header().column_index("weight"), Some(3));
    assert_eq!(rows, vec![row(&["A", "p", "X", "1"]), row(&["B", "q", "Y", ""])]);
    assert_eq!(reader.rows_read(), 2);
}

#[test]
fn quotes_are_literal() {
    let input = "id\tname\nn1\t\"quoted, value\"\n";
    let (reader, rows) = read_all(input, FileMode::Auto).unwrap();
    assert_eq!(reader.header().kind(), FileKind::Node { id: 0 });
    assert_eq!(rows, vec![row(&["n1", "\"quoted, value\""])]);
}

#[test]
fn short_row_is_reported_with_its_line() {
    let input = "id\tname\nn1\tone\nn2\n";
    let err = read_all(input, FileMode::Auto).err().expect("row length error");
    match err {
        KgtkIoError::RowLength {
            line,
            expected,
            actual,
        } => {
            assert_eq!((line, expected, actual), (3, 2, 1));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn stream_stops_after_a_malformed_row() {
    let input = "a\tb\n1\t2\n3\n4\t5\n";
    let mut reader = TsvReader::new(input.as_bytes(), &ReaderOptions::default()).unwrap();
    assert!(reader.next().unwrap().is_ok());
    assert!(reader.next().unwrap().is_err());
    assert!(reader.next().is_none());
    assert_eq!(reader.rows_read(), 1);
}

#[test]
fn empty_input_is_an_error() {
    let err = TsvReader::new("".as_bytes(), &ReaderOptions::default())
        .err()
        .expect("empty input error");
    assert!(matches!(err, KgtkIoError::EmptyInput), "unexpected error: {err}");
}

#[test]
fn duplicate_header_names_are_rejected() {
    let err = TsvReader::new("id\tname\tid\n".as_bytes(), &ReaderOptions::default())
        .err()
        .expect("duplicate column error");
    match err {
        KgtkIoError::DuplicateColumn {
            name,
            first,
            second,
        } => assert_eq!((name.as_str(), first, second), ("id", 0, 2)),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn forced_node_mode_requires_id() {
    let err = TsvReader::new(
        "node1\tlabel\tnode2\n".as_bytes(),
        &ReaderOptions {
            mode: FileMode::Node,
        },
    )
    .err()
    .expect("missing column error");
    assert!(
        matches!(err, KgtkIoError::MissingColumn { kind: "node", .. }),
        "unexpected error: {err}"
    );
}

#[test]
fn invalid_utf8_is_reported() {
    let input: &[u8] = b"id\tname\nn1\t\xff\xfe\n";
    let mut reader = TsvReader::new(input, &ReaderOptions::default()).unwrap();
    let err = reader.next().unwrap().unwrap_err();
    assert!(
        matches!(err, KgtkIoError::Utf8 { line: 2, column: 2 }),
        "unexpected error: {err}"
    );
}
