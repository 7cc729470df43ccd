mod common;

use serde_json::{json, Value};

#[tokio::test]
async fn disease_lookup_with_annotated_terms() {
    let server = common::server();

    let res = server.get("/omim/600001").await;
    res.assert_status_ok();
    let body: Value = res.json();
    assert_eq!(body["id"], 600001);
    assert_eq!(body["name"], "Disease1");
    assert!(body.get("hpo").is_none());

    let res = server
        .get("/omim/600001")
        .add_query_param("verbose", true)
        .await;
    let body: Value = res.json();
    let terms: Vec<u64> = body["hpo"]
        .as_array()
        .expect("hpo array")
        .iter()
        .map(|t| t["int"].as_u64().unwrap())
        .collect();
    assert_eq!(terms, vec![13, 21]);
}

#[tokio::test]
async fn unknown_disease_is_404() {
    let server = common::server();

    let res = server.get("/omim/123456").await;
    res.assert_status_not_found();
    let body: Value = res.json();
    assert_eq!(body["detail"], "OMIM disease does not exist");
}

#[tokio::test]
async fn gene_lookup_by_symbol_and_id() {
    let server = common::server();

    let res = server.get("/gene/Gene1").await;
    res.assert_status_ok();
    let body: Value = res.json();
    assert_eq!(body["id"], 1);
    assert_eq!(body["symbol"], "Gene1");

    let res = server.get("/gene/2").await;
    res.assert_status_ok();
    let body: Value = res.json();
    assert_eq!(body["symbol"], "Gene2");
}

#[tokio::test]
async fn unknown_gene_is_404() {
    let server = common::server();

    let res = server.get("/gene/NOPE").await;
    res.assert_status_not_found();
    let body: Value = res.json();
    assert_eq!(body["detail"], "Gene does not exist");
}

#[tokio::test]
async fn disease_similarity_compares_against_annotated_terms() {
    let server = common::server();

    let res = server
        .get("/similarity/omim")
        .add_query_param("set1", "13,21")
        .add_query_param("omim", 600001)
        .await;
    res.assert_status_ok();
    let body: Value = res.json();
    assert_eq!(body["omim"]["name"], "Disease1");
    // Disease1 annotates exactly the query set.
    assert!((body["similarity"].as_f64().unwrap() - 1.0).abs() < 1e-9);
    let set2: Vec<u64> = body["set2"]
        .as_array()
        .expect("set2 array")
        .iter()
        .map(|t| t["int"].as_u64().unwrap())
        .collect();
    assert_eq!(set2, vec![13, 21]);
}

#[tokio::test]
async fn gene_similarity_compares_against_annotated_terms() {
    let server = common::server();

    let res = server
        .get("/similarity/gene")
        .add_query_param("set1", "41")
        .add_query_param("gene", "Gene1")
        .await;
    res.assert_status_ok();
    let body: Value = res.json();
    assert_eq!(body["gene"]["symbol"], "Gene1");
    assert!((body["similarity"].as_f64().unwrap() - 1.0).abs() < 1e-9);
}

#[tokio::test]
async fn disease_batch_reports_unknown_ids_inline() {
    let server = common::server();

    let res = server
        .post("/similarity/omim")
        .json(&json!({
            "set1": "13,21",
            "omim_diseases": [600001, 999999, 600002]
        }))
        .await;
    res.assert_status_ok();
    let body: Value = res.json();

    let rows = body["other_sets"].as_array().expect("rows");
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0]["name"], "600001");
    assert!((rows[0]["similarity"].as_f64().unwrap() - 1.0).abs() < 1e-9);
    assert_eq!(rows[1]["error"], "unknown Omim disease 999999");
    assert!(rows[1]["similarity"].is_null());
    assert!(!rows[2]["similarity"].is_null());
}

#[tokio::test]
async fn gene_batch_reports_unknown_symbols_inline() {
    let server = common::server();

    let res = server
        .post("/similarity/gene")
        .json(&json!({
            "set1": "41",
            "genes": ["Gene1", "NOPE"]
        }))
        .await;
    res.assert_status_ok();
    let body: Value = res.json();

    let rows = body["other_sets"].as_array().expect("rows");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["name"], "Gene1");
    assert!(!rows[0]["similarity"].is_null());
    assert_eq!(rows[1]["error"], "unknown gene NOPE");
}

#[tokio::test]
async fn all_disease_similarity_covers_every_disease() {
    let server = common::server();

    let res = server
        .get("/similarity/omim/all")
        .add_query_param("set1", "13")
        .await;
    res.assert_status_ok();
    let body: Value = res.json();
    let rows = body["other_sets"].as_array().expect("rows");
    assert_eq!(rows.len(), 2);
    let names: Vec<&str> = rows.iter().map(|r| r["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["600001", "600002"]);
    assert!(rows.iter().all(|r| r["error"].is_null()));
}

#[tokio::test]
async fn all_gene_similarity_covers_every_gene() {
    let server = common::server();

    let res = server
        .get("/similarity/gene/all")
        .add_query_param("set1", "41")
        .await;
    res.assert_status_ok();
    let body: Value = res.json();
    let rows = body["other_sets"].as_array().expect("rows");
    assert_eq!(rows.len(), 2);
    let names: Vec<&str> = rows.iter().map(|r| r["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["Gene1", "Gene2"]);
}

#[tokio::test]
async fn similarity_parameters_are_validated_for_annotations_too() {
    let server = common::server();

    let res = server
        .get("/similarity/omim")
        .add_query_param("set1", "13")
        .add_query_param("omim", 600001)
        .add_query_param("method", "bogus")
        .await;
    res.assert_status_bad_request();
    let body: Value = res.json();
    assert_eq!(body["detail"], "Invalid `method` parameter");
}
