use super::*;
use crate::connection::Quoting;
use crate::error::QueryError;
use crate::ident::{FieldSpec, TableSpec, ValueExpr};
use crate::memory::MemoryConnection;
use crate::values;
use crate::zone::DateZone;

fn qb() -> QueryBuilder {
    let mut qb = QueryBuilder::new(Arc::new(MemoryConnection::new()));
    qb.options(QueryOptions::new().date_zone(DateZone::Utc));
    qb
}

#[test]
fn test_select_from_where() {
    let mut qb = qb();
    qb.select("*")
        .unwrap()
        .from("users")
        .unwrap()
        .where_("id = ?", &values![5])
        .unwrap();
    assert_eq!(qb.buffer(), "SELECT * FROM `users` WHERE id = 5");
}

#[test]
fn test_select_field_list() {
    let mut qb = qb();
    qb.select(vec![FieldSpec::from("a"), FieldSpec::alias("total", "SUM(b)")])
        .unwrap();
    assert_eq!(qb.buffer(), "SELECT `a`,SUM(b) AS `total`");
}

#[test]
fn test_select_single_alias_object() {
    let mut qb = qb();
    qb.select(FieldSpec::aliases([
        ("n", ValueExpr::raw("COUNT(*)")),
        ("label", ValueExpr::escaped("all")),
    ]))
    .unwrap();
    assert_eq!(qb.buffer(), "SELECT COUNT(*) AS `n`,'all' AS `label`");
}

#[test]
fn test_select_empty_list_fails_and_leaves_buffer() {
    let mut qb = qb();
    qb.sql("-- start");
    let err = qb.select(Vec::<FieldSpec>::new()).unwrap_err();
    assert!(matches!(err, QueryError::EmptyInput(_)));
    assert_eq!(qb.buffer(), "-- start");
}

#[test]
fn test_from_alias_and_unescaped() {
    let mut qb = qb();
    qb.from(TableSpec::alias("u", "users")).unwrap();
    assert_eq!(qb.buffer(), " FROM `users` AS `u`");

    let mut qb2 = self::qb();
    qb2.from_with("users u", false).unwrap();
    assert_eq!(qb2.buffer(), " FROM users u");
}

#[test]
fn test_where_escapes_strings() {
    let mut qb = qb();
    qb.where_("name = ?", &values!["O'Brien"]).unwrap();
    assert_eq!(qb.buffer(), r" WHERE name = 'O\'Brien'");
}

#[test]
fn test_and_or_chain() {
    let mut qb = qb();
    qb.where_("a = ?", &values![1])
        .unwrap()
        .and("b IN ?", &values![vec![2, 3]])
        .unwrap()
        .or("c IS ?", &values![None::<i32>])
        .unwrap();
    assert_eq!(qb.buffer(), " WHERE a = 1 AND b IN (2,3) OR c IS NULL");
}

#[test]
fn test_where_mismatch_leaves_buffer() {
    let mut qb = qb();
    qb.select("*").unwrap();
    let err = qb.where_("a = ? AND b = ?", &values![1]).unwrap_err();
    assert!(err.is_parameter_count_mismatch());
    assert_eq!(qb.buffer(), "SELECT *");
}

#[test]
fn test_escaped_mark_survives_until_execution() {
    let mut qb = qb();
    qb.select("*")
        .unwrap()
        .from("t")
        .unwrap()
        .where_(r"a = \? AND b = ?", &values![2])
        .unwrap();
    assert_eq!(qb.buffer(), r"SELECT * FROM `t` WHERE a = \? AND b = 2");
    assert_eq!(qb.to_sql().unwrap(), "SELECT * FROM `t` WHERE a = ? AND b = 2");
}

#[test]
fn test_join() {
    let mut qb = qb();
    qb.join(
        &Join::new("profiles")
            .kind("left")
            .alias("p")
            .on("p.user_id = u.id AND p.kind = ?"),
        &values!["main"],
    )
    .unwrap();
    assert_eq!(
        qb.buffer(),
        " LEFT JOIN `profiles` AS `p` ON (p.user_id = u.id AND p.kind = 'main')"
    );
}

#[test]
fn test_join_defaults_and_unescaped() {
    let mut qb = qb();
    qb.join(&Join::new("roles"), &[]).unwrap();
    assert_eq!(qb.buffer(), " INNER JOIN `roles`");

    let mut qb2 = self::qb();
    qb2.join(&Join::new("roles").alias("r").escape(false), &[])
        .unwrap();
    assert_eq!(qb2.buffer(), " INNER JOIN roles AS r");
}

#[test]
fn test_limit() {
    let mut qb = qb();
    qb.limit(10);
    assert_eq!(qb.buffer(), " LIMIT 10");
    qb.limit_offset(20, 10);
    assert_eq!(qb.buffer(), " LIMIT 10 LIMIT 20,10");
}

#[test]
fn test_add_raw() {
    let mut qb = qb();
    qb.select("*")
        .unwrap()
        .from("t")
        .unwrap()
        .add("ORDER BY id DESC");
    assert_eq!(qb.buffer(), "SELECT * FROM `t` ORDER BY id DESC");
}

#[test]
fn test_insert_single_row() {
    let mut qb = qb();
    qb.insert("t", vec!["a", "b"], &values![1, "x"]).unwrap();
    assert_eq!(qb.buffer(), "INSERT INTO `t`(`a`,`b`) VALUES (1,'x')");
}

#[test]
fn test_insert_nested_single_row() {
    let mut qb = qb();
    qb.insert(
        "t",
        vec!["a", "b"],
        &[Value::from(vec![Value::from(1), Value::from("x")])],
    )
    .unwrap();
    assert_eq!(qb.buffer(), "INSERT INTO `t`(`a`,`b`) VALUES (1,'x')");
}

#[test]
fn test_insert_multiple_rows() {
    let mut qb = qb();
    qb.insert("t", vec!["a"], &values![vec![1], vec![2]]).unwrap();
    assert_eq!(qb.buffer(), "INSERT INTO `t`(`a`) VALUES (1),(2)");
}

#[test]
fn test_insert_omit_and_raw_fields() {
    let mut qb = qb();
    qb.insert("t", InsertFields::Omit, &values![1, true]).unwrap();
    assert_eq!(qb.buffer(), "INSERT INTO `t` VALUES (1,1)");

    let mut qb2 = self::qb();
    qb2.insert("t", "a, b", &[]).unwrap();
    assert_eq!(qb2.buffer(), "INSERT INTO `t`(a, b) ");

    let mut qb3 = self::qb();
    qb3.insert_into("t").unwrap().add("SELECT * FROM s");
    assert_eq!(qb3.buffer(), "INSERT INTO `t`  SELECT * FROM s");
}

#[test]
fn test_insert_empty_fields_fails() {
    let mut qb = qb();
    let err = qb
        .insert("t", Vec::<FieldSpec>::new(), &values![1])
        .unwrap_err();
    assert!(matches!(err, QueryError::EmptyInput(_)));
    assert_eq!(qb.buffer(), "");
}

#[test]
fn test_update_set() {
    let mut qb = qb();
    qb.update("users")
        .unwrap()
        .set([
            ("name", ValueExpr::from("bob")),
            ("age", ValueExpr::from(30)),
            ("updated", ValueExpr::raw("NOW()")),
        ])
        .unwrap()
        .where_("id = ?", &values![1])
        .unwrap();
    assert_eq!(
        qb.buffer(),
        "UPDATE `users` SET `name`='bob',`age`=30,`updated`=NOW() WHERE id = 1"
    );
}

#[test]
fn test_set_unescaped_fields_and_empty() {
    let mut qb = qb();
    qb.set_with([("a", 1)], false).unwrap();
    assert_eq!(qb.buffer(), " SET a=1");

    let err = qb
        .set(Vec::<(&str, ValueExpr)>::new())
        .unwrap_err();
    assert!(matches!(err, QueryError::EmptyInput(_)));
    assert_eq!(qb.buffer(), " SET a=1");
}

#[test]
fn test_set_uses_table_quote_for_fields() {
    let conn = MemoryConnection::new().with_quoting(Quoting {
        string: '\'',
        table: '"',
        field: '[',
    });
    let mut qb = QueryBuilder::new(Arc::new(conn));
    qb.set([("a", "x")]).unwrap();
    assert_eq!(qb.buffer(), " SET \"a\"='x'");
}

#[test]
fn test_delete() {
    let mut qb = qb();
    qb.delete()
        .from("users")
        .unwrap()
        .where_("id = ?", &values![3])
        .unwrap();
    assert_eq!(qb.buffer(), "DELETE FROM `users` WHERE id = 3");

    let mut qb2 = self::qb();
    qb2.delete_tables(TableSpec::alias("u", "users")).unwrap();
    assert_eq!(qb2.buffer(), "DELETE `users` AS `u`");
}

#[test]
fn test_to_sql_resolves_bound_values() {
    let mut qb = qb();
    qb.sql("SELECT * FROM t WHERE a = ? AND b = '?'")
        .values(values!["z"]);
    assert_eq!(
        qb.to_sql().unwrap(),
        "SELECT * FROM t WHERE a = 'z' AND b = '?'"
    );

    qb.values(vec![]);
    assert!(qb.to_sql().unwrap_err().is_parameter_count_mismatch());
}

#[test]
fn test_dates_use_builder_zone() {
    let mut qb = qb();
    qb.options(QueryOptions::new().date_zone(DateZone::Fixed(3600)));
    qb.where_("at > ?", &[Value::Date(1_299_215_167_000)]).unwrap();
    assert_eq!(qb.buffer(), " WHERE at > '2011-03-04 06:06:07'");
}

#[test]
fn test_debug_hides_hooks() {
    let mut qb = qb();
    qb.on_finish(|| {});
    let dbg = format!("{qb:?}");
    assert!(dbg.contains("on_finish: true"));
    assert!(dbg.contains("on_start: false"));
}
