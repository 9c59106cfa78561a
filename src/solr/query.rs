//! Query expression builders

/// Build a Solr function range query over `field`.
///
/// `lower`/`upper` bound the range; `incl`/`incu` control bound inclusivity.
/// An optional `key` labels the facet bucket in the response:
///
/// ```text
/// {!frange l=0 incl=false u=100 incu=true key="1 day"}deleteTime
/// ```
pub fn frange(
    field: &str,
    lower: Option<i64>,
    upper: Option<i64>,
    incl: bool,
    incu: bool,
    key: Option<&str>,
) -> String {
    let mut query = String::from("{!frange");
    if let Some(l) = lower {
        query.push_str(&format!(" l={l} incl={incl}"));
    }
    if let Some(u) = upper {
        query.push_str(&format!(" u={u} incu={incu}"));
    }
    if let Some(k) = key {
        query.push_str(&format!(" key=\"{k}\""));
    }
    query.push('}');
    query.push_str(field);
    query
}

/// Build a Solr terms query matching any of `values` in `field`.
pub fn terms(field: &str, values: &[String]) -> String {
    format!("{{!terms f={field}}}{}", values.join(","))
}

/// Join two filter clauses with `AND`, tolerating either being empty.
pub fn join_fq(base: &str, clause: &str) -> String {
    match (base.is_empty(), clause.is_empty()) {
        (true, _) => clause.to_string(),
        (_, true) => base.to_string(),
        _ => format!("{base} AND {clause}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frange_both_bounds() {
        assert_eq!(
            frange("deleteTime", Some(10), Some(20), false, true, None),
            "{!frange l=10 incl=false u=20 incu=true}deleteTime"
        );
    }

    #[test]
    fn test_frange_lower_only() {
        assert_eq!(
            frange("deleteTime", Some(0), None, false, true, None),
            "{!frange l=0 incl=false}deleteTime"
        );
    }

    #[test]
    fn test_frange_upper_only_with_key() {
        assert_eq!(
            frange("deleteTime", None, Some(5), true, true, Some("invalid deleteTime")),
            "{!frange u=5 incu=true key=\"invalid deleteTime\"}deleteTime"
        );
    }

    #[test]
    fn test_terms() {
        let ids = vec!["a1".to_string(), "b2".to_string()];
        assert_eq!(terms("identity", &ids), "{!terms f=identity}a1,b2");
    }

    #[test]
    fn test_join_fq() {
        assert_eq!(join_fq("", "deleted:true"), "deleted:true");
        assert_eq!(join_fq("sourceType:HDFS", ""), "sourceType:HDFS");
        assert_eq!(
            join_fq("sourceType:HDFS", "deleted:true"),
            "sourceType:HDFS AND deleted:true"
        );
    }
}
