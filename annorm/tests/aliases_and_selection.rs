#[test]
fn order_line_fragments() {
    let report = annorm::examples::example03_aliases_and_selection::run().expect("example should succeed");

    assert_eq!(report.keys, "o.order_id = 1001, o.line_no = 2");
    assert_eq!(report.values, "o.qty = 3, o.comment = 'don''t bend', c.name = 'Ada'");
    assert_eq!(
        report.everything,
        "orders.order_id = 1001, orders.line_no = 2, orders.qty = 3, \
         orders.comment = 'don''t bend', customers.name = 'Ada'"
    );
    assert_eq!(report.chosen, "o.qty = 3, o.comment = 'don''t bend'");
}
