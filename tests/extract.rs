// tests/extract.rs
use html_report::extract::first_table;

#[test]
fn rows_and_cells_keep_document_order() {
    let html = r#"
        <html><body>
        <p>intro</p>
        <table>
          <tr><th>Assesslet Name</th><th>Failed</th><th>Note</th></tr>
          <tr><td>Login</td><td>1</td></tr>
          <tr><td>Logout</td><td>0</td><td>x</td><td>extra</td></tr>
        </table>
        </body></html>"#;

    let table = first_table(html).unwrap();
    assert_eq!(table.row_count(), 3);
    assert_eq!(table.rows[0], vec!["Assesslet Name", "Failed", "Note"]);
    // Ragged rows pass through uncorrected
    assert_eq!(table.rows[1].len(), 2);
    assert_eq!(table.rows[2].len(), 4);
    assert_eq!(table.max_width(), 4);
}

#[test]
fn missing_table_is_absent() {
    assert!(first_table("<html><body><div>no grid here</div></body></html>").is_none());
    assert!(first_table("").is_none());
}

#[test]
fn only_the_first_table_counts() {
    let html = "<table><tr><td>a</td></tr></table><table><tr><td>b</td></tr><tr><td>c</td></tr></table>";
    let table = first_table(html).unwrap();
    assert_eq!(table.rows, vec![vec!["a"]]);
}

#[test]
fn fragments_are_stripped_then_joined() {
    let html = "<table><tr><td> a <b>b</b> </td><td>\n  Tom &amp; Jerry&nbsp;</td></tr></table>";
    let table = first_table(html).unwrap();
    assert_eq!(table.rows[0], vec!["ab", "Tom & Jerry"]);
}

#[test]
fn nested_tables_do_not_end_the_outer_one() {
    let html = "<TABLE><TR><TD>outer<table><tr><td>inner</td></tr></table></TD></TR>\
                <tr><td>after</td></tr></TABLE>";
    let table = first_table(html).unwrap();
    // Every row counts, and a cell's text includes what is nested in it
    assert_eq!(
        table.rows,
        vec![vec!["outerinner", "inner"], vec!["inner"], vec!["after"]]
    );
}

#[test]
fn cells_after_a_nested_table_stay_in_their_row() {
    let html = "<table><tr><td>A<table><tr><td>x</td></tr></table></td><td>B</td></tr></table>";
    let table = first_table(html).unwrap();
    assert_eq!(table.rows, vec![vec!["Ax", "x", "B"], vec!["x"]]);
}

#[test]
fn html5_named_entities_are_decoded() {
    let html = "<table><tr><td>Caf&eacute; &copy; &mdash;</td><td>&euro;5&hellip;</td></tr></table>";
    let table = first_table(html).unwrap();
    assert_eq!(table.rows[0], vec!["Café © —", "€5…"]);
}

#[test]
fn stray_lt_stays_inside_the_text_run() {
    let table = first_table("<table><tr><td>1 < 2</td><td> a <= b </td></tr></table>").unwrap();
    assert_eq!(table.rows[0], vec!["1 < 2", "a <= b"]);
}

#[test]
fn implicit_end_tags_and_ignored_markup() {
    let html = "<!DOCTYPE html><!-- <table><tr><td>fake</td></tr></table> -->\
                <script>var t = '<table>';</script>\
                <table><tr><td>1<td>2<tr><td>3</table>";
    let table = first_table(html).unwrap();
    assert_eq!(table.rows, vec![vec!["1", "2"], vec!["3"]]);
}
