mod common;

use serde_json::{json, Value};

#[tokio::test]
async fn search_is_case_insensitive() {
    let server = common::server();

    let res = server.get("/terms/search/CHILD").await;
    res.assert_status_ok();
    let hits: Vec<Value> = res.json();
    let ids: Vec<u64> = hits.iter().map(|t| t["int"].as_u64().unwrap()).collect();
    assert_eq!(ids, vec![11, 12, 13, 21, 31, 41]);
}

#[tokio::test]
async fn search_is_paged_in_id_order() {
    let server = common::server();

    // "-1" matches the level 1-1, 2-1, 3-1 and 4-1 names.
    let res = server
        .get("/terms/search/-1")
        .add_query_param("limit", 2)
        .await;
    res.assert_status_ok();
    let hits: Vec<Value> = res.json();
    let ids: Vec<u64> = hits.iter().map(|t| t["int"].as_u64().unwrap()).collect();
    assert_eq!(ids, vec![11, 21]);

    let res = server
        .get("/terms/search/-1")
        .add_query_param("offset", 2)
        .await;
    let hits: Vec<Value> = res.json();
    let ids: Vec<u64> = hits.iter().map(|t| t["int"].as_u64().unwrap()).collect();
    assert_eq!(ids, vec![31, 41]);
}

#[tokio::test]
async fn gene_union_and_intersection() {
    let server = common::server();

    let res = server
        .get("/terms/union/genes")
        .add_query_param("set1", "41,31")
        .await;
    res.assert_status_ok();
    let genes: Vec<Value> = res.json();
    let symbols: Vec<&str> = genes
        .iter()
        .map(|g| g["symbol"].as_str().unwrap())
        .collect();
    assert_eq!(symbols, vec!["Gene1", "Gene2"]);

    let res = server
        .get("/terms/intersect/genes")
        .add_query_param("set1", "41,31")
        .await;
    let genes: Vec<Value> = res.json();
    let symbols: Vec<&str> = genes
        .iter()
        .map(|g| g["symbol"].as_str().unwrap())
        .collect();
    assert_eq!(symbols, vec!["Gene1"]);
}

#[tokio::test]
async fn disease_union_and_intersection() {
    let server = common::server();

    let res = server
        .get("/terms/union/omim")
        .add_query_param("set1", "13,21")
        .await;
    res.assert_status_ok();
    let diseases: Vec<Value> = res.json();
    let names: Vec<&str> = diseases
        .iter()
        .map(|d| d["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Disease1", "Disease2"]);

    let res = server
        .get("/terms/intersect/omim")
        .add_query_param("set1", "13,21")
        .await;
    let diseases: Vec<Value> = res.json();
    let names: Vec<&str> = diseases
        .iter()
        .map(|d| d["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Disease1"]);
}

#[tokio::test]
async fn set_build_failure_voids_the_whole_algebra_request() {
    let server = common::server();

    let res = server
        .get("/terms/union/genes")
        .add_query_param("set1", "41,999")
        .await;
    res.assert_status_not_found();
    let body: Value = res.json();
    assert_eq!(body["detail"], "HPO Term does not exist");
    assert_eq!(res.headers().get("x-termnotfound").unwrap(), "999");
}

#[tokio::test]
async fn identical_sets_have_similarity_one() {
    let server = common::server();

    let res = server
        .get("/terms/similarity")
        .add_query_param("set1", "21,31")
        .add_query_param("set2", "21,31")
        .await;
    res.assert_status_ok();
    let body: Value = res.json();
    assert_eq!(body["set1"].as_array().unwrap().len(), 2);
    assert_eq!(body["set2"].as_array().unwrap().len(), 2);
    assert!((body["similarity"].as_f64().unwrap() - 1.0).abs() < 1e-9);
}

#[tokio::test]
async fn invalid_scoring_parameters_are_rejected() {
    let server = common::server();

    let res = server
        .get("/terms/similarity")
        .add_query_param("set1", "21")
        .add_query_param("set2", "31")
        .add_query_param("method", "bogus")
        .await;
    res.assert_status_bad_request();
    let body: Value = res.json();
    assert_eq!(body["detail"], "Invalid `method` parameter");

    let res = server
        .get("/terms/similarity")
        .add_query_param("set1", "21")
        .add_query_param("set2", "31")
        .add_query_param("combine", "bogus")
        .await;
    res.assert_status_bad_request();
    let body: Value = res.json();
    assert_eq!(body["detail"], "Invalid `combine` parameter");

    let res = server
        .get("/terms/similarity")
        .add_query_param("set1", "21")
        .add_query_param("set2", "31")
        .add_query_param("kind", "bogus")
        .await;
    res.assert_status_bad_request();
    let body: Value = res.json();
    assert_eq!(body["detail"], "Invalid information content kind specified");
}

#[tokio::test]
async fn batch_similarity_isolates_bad_candidate_sets() {
    let server = common::server();

    let res = server
        .post("/terms/similarity")
        .json(&json!({
            "set1": "21,31",
            "other_sets": [
                { "name": "identical", "set2": "21,31" },
                { "name": "missing", "set2": "21,999" },
                { "name": "garbage", "set2": "HP:abc" },
                { "name": "sibling", "set2": "12" }
            ]
        }))
        .await;
    res.assert_status_ok();
    let body: Value = res.json();

    let rows = body["other_sets"].as_array().expect("rows");
    assert_eq!(rows.len(), 4);
    assert!((rows[0]["similarity"].as_f64().unwrap() - 1.0).abs() < 1e-9);
    assert!(rows[0]["error"].is_null());
    assert!(rows[1]["similarity"].is_null());
    assert_eq!(rows[1]["error"], "999");
    assert_eq!(rows[2]["error"], "HP:abc");
    assert!(!rows[3]["similarity"].is_null());
}

#[tokio::test]
async fn batch_similarity_fails_on_invalid_base_set() {
    let server = common::server();

    let res = server
        .post("/terms/similarity")
        .json(&json!({
            "set1": "21,999",
            "other_sets": [{ "name": "any", "set2": "21" }]
        }))
        .await;
    res.assert_status_not_found();
    let body: Value = res.json();
    assert_eq!(body["detail"], "HPO Term does not exist");
}

#[tokio::test]
async fn gene_enrichment_ranks_ascending() {
    let server = common::server();

    let res = server
        .get("/terms/enrichment/genes")
        .add_query_param("set1", "21,31")
        .await;
    res.assert_status_ok();
    let records: Vec<Value> = res.json();
    assert_eq!(records.len(), 2);
    for record in &records {
        assert_eq!(record["count"], 2);
        assert!(record["gene"]["symbol"].is_string());
    }
    let scores: Vec<f64> = records
        .iter()
        .map(|r| r["enrichment"].as_f64().unwrap())
        .collect();
    assert!(scores.windows(2).all(|pair| pair[0] <= pair[1]));

    let res = server
        .get("/terms/enrichment/genes")
        .add_query_param("set1", "21,31")
        .add_query_param("limit", 1)
        .await;
    let paged: Vec<Value> = res.json();
    assert_eq!(paged.len(), 1);
    assert_eq!(paged[0]["gene"], records[0]["gene"]);
}

#[tokio::test]
async fn disease_enrichment_reports_disease_views() {
    let server = common::server();

    let res = server
        .get("/terms/enrichment/omim")
        .add_query_param("set1", "13")
        .await;
    res.assert_status_ok();
    let records: Vec<Value> = res.json();
    assert_eq!(records.len(), 2);
    for record in &records {
        assert_eq!(record["count"], 1);
        assert!(record["omim"]["name"].is_string());
    }
}

#[tokio::test]
async fn unknown_enrichment_method_is_rejected() {
    let server = common::server();

    let res = server
        .get("/terms/enrichment/genes")
        .add_query_param("set1", "21")
        .add_query_param("method", "bogus")
        .await;
    res.assert_status_bad_request();
    let body: Value = res.json();
    assert_eq!(body["detail"], "Invalid query");
    assert_eq!(
        res.headers().get("x-error").unwrap(),
        "Invalid query provided"
    );
}

#[tokio::test]
async fn suggest_excludes_the_base_set() {
    let server = common::server();

    let res = server
        .get("/terms/suggest")
        .add_query_param("set1", "21")
        .await;
    res.assert_status_ok();
    let suggestions: Vec<Value> = res.json();
    assert!(!suggestions.is_empty());
    assert!(suggestions.iter().all(|t| t["int"] != 21));
}

#[tokio::test]
async fn suggest_with_zero_cutoffs_is_empty() {
    let server = common::server();

    let res = server
        .get("/terms/suggest")
        .add_query_param("set1", "21")
        .add_query_param("n_genes", 0)
        .add_query_param("n_omim", 0)
        .await;
    res.assert_status_ok();
    let suggestions: Vec<Value> = res.json();
    assert!(suggestions.is_empty());
}

#[tokio::test]
async fn suggest_honours_the_limit() {
    let server = common::server();

    let res = server
        .get("/terms/suggest")
        .add_query_param("set1", "21")
        .add_query_param("limit", 1)
        .await;
    res.assert_status_ok();
    let suggestions: Vec<Value> = res.json();
    assert_eq!(suggestions.len(), 1);
}

#[tokio::test]
async fn hierarchy_projects_discovered_children_first() {
    let server = common::server();

    let res = server
        .get("/terms/hierarchy")
        .add_query_param("set1", "11,21")
        .await;
    res.assert_status_ok();
    let records: Vec<Value> = res.json();

    let names: Vec<&str> = records
        .iter()
        .map(|r| r["name"].as_str().unwrap())
        .collect();
    // 31 is the only direct child outside the set.
    assert_eq!(
        names,
        vec![
            "Test child level 3-1",
            "Test child level 1-1",
            "Test child level 2-1"
        ]
    );

    let parent = records
        .iter()
        .find(|r| r["name"] == "Test child level 1-1")
        .expect("record for 11");
    assert_eq!(parent["imports"][0], "Test child level 2-1");
    assert!(parent["genes"].as_array().unwrap().contains(&json!("Gene1")));
    assert!(parent["diseases"]
        .as_array()
        .unwrap()
        .contains(&json!("Disease1")));
}
