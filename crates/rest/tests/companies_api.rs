//! Company API tests.
//!
//! Tests the company listing pipeline end to end:
//! - Paging, clamping and the `X-Pagination` header
//! - Ordering through the mapping registry
//! - Field projection
//! - Filtering
//! - The hypermedia envelope
//! - Company reads and writes

mod common;

use axum::body::Bytes;
use axum::http::{HeaderValue, Method, header};
use serde_json::{Value, json};
use uuid::Uuid;

use common::assertions::{
    assert_allow, assert_location, assert_problem, assert_status, assert_validation_error, names,
    pagination, relations,
};
use common::fixtures::{company_body, numbered_companies, sample_companies};
use common::harness::{BASE_URL, FailingStorage, TestApp};
use hsl_rest::ServerConfig;

const HATEOAS: HeaderValue = HeaderValue::from_static("application/vnd.marvin.hateoas+json");

fn company_names(from: usize, to: usize) -> Vec<String> {
    (from..=to).map(|n| format!("Company {:02}", n)).collect()
}

// =============================================================================
// Paging
// =============================================================================

#[tokio::test]
async fn test_first_page_by_default() {
    let app = TestApp::with_companies(numbered_companies());

    let response = app.server.get("/api/companies").await;

    assert_status(&response, 200);
    let body: Value = response.json();
    assert_eq!(names(&body), company_names(1, 10));

    let header = pagination(&response);
    assert_eq!(header["totalCount"], 25);
    assert_eq!(header["pageSize"], 10);
    assert_eq!(header["currentPage"], 1);
    assert_eq!(header["totalPages"], 3);
    assert_eq!(header["previousPageLink"], Value::Null);
    assert_eq!(
        header["nextPageLink"],
        format!("{BASE_URL}/api/companies?orderBy=Name&pageNumber=2&pageSize=10")
    );
}

#[tokio::test]
async fn test_middle_page_has_both_neighbours() {
    let app = TestApp::with_companies(numbered_companies());

    let response = app.server.get("/api/companies?pageNumber=2").await;

    assert_status(&response, 200);
    assert_eq!(names(&response.json()), company_names(11, 20));

    let header = pagination(&response);
    assert_eq!(header["currentPage"], 2);
    assert_eq!(
        header["previousPageLink"],
        format!("{BASE_URL}/api/companies?orderBy=Name&pageNumber=1&pageSize=10")
    );
    assert_eq!(
        header["nextPageLink"],
        format!("{BASE_URL}/api/companies?orderBy=Name&pageNumber=3&pageSize=10")
    );
}

#[tokio::test]
async fn test_last_page_is_partial() {
    let app = TestApp::with_companies(numbered_companies());

    let response = app.server.get("/api/companies?pageNumber=3").await;

    assert_eq!(names(&response.json()), company_names(21, 25));
    assert_eq!(pagination(&response)["nextPageLink"], Value::Null);
}

#[tokio::test]
async fn test_page_size_is_clamped() {
    let app = TestApp::with_companies(numbered_companies());

    let response = app.server.get("/api/companies?pageSize=50").await;

    assert_status(&response, 200);
    let body: Value = response.json();
    assert_eq!(body.as_array().unwrap().len(), 10);
    assert_eq!(pagination(&response)["pageSize"], 10);
}

#[tokio::test]
async fn test_page_past_the_end_is_empty() {
    let app = TestApp::with_companies(numbered_companies());

    let response = app.server.get("/api/companies?pageNumber=9").await;

    assert_status(&response, 200);
    assert_eq!(response.json::<Value>(), json!([]));
    let header = pagination(&response);
    assert_eq!(header["totalCount"], 25);
    assert_eq!(header["currentPage"], 9);
    assert_eq!(
        header["previousPageLink"],
        format!("{BASE_URL}/api/companies?orderBy=Name&pageNumber=3&pageSize=10")
    );
    assert_eq!(header["nextPageLink"], Value::Null);

    let empty = TestApp::new();
    let response = empty.server.get("/api/companies?pageNumber=4").await;
    assert_status(&response, 200);
    assert_eq!(pagination(&response)["previousPageLink"], Value::Null);
}

#[tokio::test]
async fn test_empty_store() {
    let app = TestApp::new();

    let response = app.server.get("/api/companies").await;

    assert_status(&response, 200);
    assert_eq!(response.json::<Value>(), json!([]));
    let header = pagination(&response);
    assert_eq!(header["totalPages"], 0);
    assert_eq!(header["nextPageLink"], Value::Null);
}

#[tokio::test]
async fn test_non_numeric_page_is_rejected() {
    let app = TestApp::new();

    let response = app.server.get("/api/companies?pageNumber=two").await;

    assert_problem(&response, 400);
}

#[tokio::test]
async fn test_page_links_carry_query() {
    let app = TestApp::with_companies(numbered_companies());

    let response = app
        .server
        .get("/api/companies?searchQuery=company&pageSize=5&orderBy=name%20desc&fields=id")
        .await;

    let header = pagination(&response);
    assert_eq!(
        header["nextPageLink"],
        format!(
            "{BASE_URL}/api/companies?fields=id&orderBy=name+desc&searchQuery=company&pageNumber=2&pageSize=5"
        )
    );
}

#[tokio::test]
async fn test_head_request() {
    let app = TestApp::with_companies(numbered_companies());

    let response = app.server.method(Method::HEAD, "/api/companies").await;

    assert_status(&response, 200);
    assert!(response.text().is_empty());
    assert_eq!(pagination(&response)["totalCount"], 25);
}

// =============================================================================
// Ordering
// =============================================================================

#[tokio::test]
async fn test_order_by_name_descending() {
    let app = TestApp::with_companies(numbered_companies());

    let response = app.server.get("/api/companies?orderBy=name%20desc").await;

    let mut expected = company_names(16, 25);
    expected.reverse();
    assert_eq!(names(&response.json()), expected);
}

#[tokio::test]
async fn test_order_by_age_sorts_by_start_date_inverted() {
    let app = TestApp::with_companies(numbered_companies());

    let response = app
        .server
        .get("/api/companies?orderBy=age&pageSize=3")
        .await;

    // Youngest first
    assert_eq!(
        names(&response.json()),
        vec!["Company 25", "Company 24", "Company 23"]
    );
}

#[tokio::test]
async fn test_order_by_several_clauses() {
    let app = TestApp::with_companies(sample_companies());

    let response = app
        .server
        .get("/api/companies?orderBy=location%20desc,name")
        .await;

    assert_status(&response, 200);
    let ordered = names(&response.json());
    assert_eq!(ordered.first().map(String::as_str), Some("CareCode"));
}

#[tokio::test]
async fn test_order_by_ignores_unknown_direction_words() {
    let app = TestApp::with_companies(numbered_companies());
    let ascending = names(&app.server.get("/api/companies?orderBy=name").await.json());

    for order_by in ["name%20sideways", "name%20desc%20please", "name%20,"] {
        let response = app
            .server
            .get(&format!("/api/companies?orderBy={order_by}"))
            .await;
        assert_status(&response, 200);
        assert_eq!(names(&response.json()), ascending, "orderBy={order_by}");
    }

    let response = app
        .server
        .get("/api/companies?orderBy=name%20sideways%20desc")
        .await;
    let mut descending = company_names(16, 25);
    descending.reverse();
    assert_eq!(names(&response.json()), descending);
}

#[tokio::test]
async fn test_unknown_order_by_is_rejected() {
    let app = TestApp::with_companies(numbered_companies());

    let response = app.server.get("/api/companies?orderBy=founder").await;

    let body = assert_problem(&response, 400);
    assert!(body["detail"].as_str().unwrap().contains("founder"));
}

// =============================================================================
// Projection
// =============================================================================

#[tokio::test]
async fn test_fields_select_members_in_request_order() {
    let app = TestApp::with_companies(numbered_companies());

    let response = app
        .server
        .get("/api/companies?fields=name,id&pageSize=1")
        .await;

    assert_status(&response, 200);
    assert!(response.text().starts_with(r#"[{"name":"Company 01","id":""#));
    let body: Value = response.json();
    assert_eq!(body[0].as_object().unwrap().len(), 2);
}

#[tokio::test]
async fn test_all_members_without_fields() {
    let app = TestApp::with_companies(sample_companies());

    let response = app.server.get("/api/companies?pageSize=1").await;

    let body: Value = response.json();
    let first = body[0].as_object().unwrap();
    for member in ["id", "name", "age", "location"] {
        assert!(first.contains_key(member), "missing {member}");
    }
}

#[tokio::test]
async fn test_unknown_field_is_rejected() {
    let app = TestApp::with_companies(numbered_companies());

    let response = app.server.get("/api/companies?fields=id,founder").await;

    assert_problem(&response, 400);
}

// =============================================================================
// Filtering
// =============================================================================

#[tokio::test]
async fn test_location_filter_ignores_case() {
    let app = TestApp::with_companies(sample_companies());

    let response = app.server.get("/api/companies?location=LEEDS").await;

    assert_eq!(
        names(&response.json()),
        vec!["Clinical Care Systems", "MediSoft"]
    );
    assert_eq!(pagination(&response)["totalCount"], 2);
}

#[tokio::test]
async fn test_search_query_matches_substring() {
    let app = TestApp::with_companies(sample_companies());

    let response = app.server.get("/api/companies?searchQuery=care").await;

    assert_eq!(
        names(&response.json()),
        vec!["CareCode", "Clinical Care Systems"]
    );
}

#[tokio::test]
async fn test_name_filter_is_exact() {
    let app = TestApp::with_companies(sample_companies());

    let response = app.server.get("/api/companies?name=%20carecode%20").await;
    assert_eq!(names(&response.json()), vec!["CareCode"]);

    let response = app.server.get("/api/companies?name=care").await;
    assert_eq!(response.json::<Value>(), json!([]));
}

// =============================================================================
// Hypermedia envelope
// =============================================================================

#[tokio::test]
async fn test_linked_listing() {
    let app = TestApp::with_companies(numbered_companies());

    let response = app
        .server
        .get("/api/companies?pageNumber=2")
        .add_header(header::ACCEPT, HATEOAS)
        .await;

    assert_status(&response, 200);
    let body: Value = response.json();
    assert_eq!(body["value"].as_array().unwrap().len(), 10);
    assert_eq!(
        relations(&body["links"]),
        vec!["self", "nextPage", "previousPage"]
    );
    assert_eq!(
        body["links"][0]["href"],
        format!("{BASE_URL}/api/companies?orderBy=Name&pageNumber=2&pageSize=10")
    );
    assert_eq!(
        relations(&body["value"][0]["links"]),
        vec!["self", "delete_company", "create_product_for_company", "products"]
    );

    // Page links move into the body
    let header = pagination(&response);
    assert_eq!(header["totalCount"], 25);
    assert!(header.get("previousPageLink").is_none());
    assert!(header.get("nextPageLink").is_none());
}

#[tokio::test]
async fn test_linked_listing_with_fields() {
    let app = TestApp::with_companies(sample_companies());

    let response = app
        .server
        .get("/api/companies?fields=id")
        .add_header(header::ACCEPT, HATEOAS)
        .await;

    let body: Value = response.json();
    let first = body["value"][0].as_object().unwrap();
    assert_eq!(first.len(), 2);
    let id = first["id"].as_str().unwrap();
    assert_eq!(
        first["links"][0]["href"],
        format!("{BASE_URL}/api/companies/{id}?fields=id")
    );
}

// =============================================================================
// Single company
// =============================================================================

#[tokio::test]
async fn test_get_company() {
    let companies = sample_companies();
    let id = companies[2].id;
    let app = TestApp::with_companies(companies);

    let response = app.server.get(&format!("/api/companies/{id}")).await;

    assert_status(&response, 200);
    let body: Value = response.json();
    assert_eq!(body["id"], id.to_string());
    assert_eq!(body["name"], "Clinical Care Systems");
    // Age stops at the date of demise
    assert_eq!(body["age"], 34);
    assert_eq!(body["location"], "leeds");
    assert_eq!(body["links"][0]["href"], format!("{BASE_URL}/api/companies/{id}"));
    assert_eq!(body["links"][1]["method"], "DELETE");
}

#[tokio::test]
async fn test_get_company_with_fields() {
    let companies = sample_companies();
    let id = companies[0].id;
    let app = TestApp::with_companies(companies);

    let response = app
        .server
        .get(&format!("/api/companies/{id}?fields=name"))
        .await;

    let body: Value = response.json();
    assert_eq!(body.as_object().unwrap().len(), 2);
    assert_eq!(body["name"], "MediSoft");
    assert_eq!(
        body["links"][0]["href"],
        format!("{BASE_URL}/api/companies/{id}?fields=name")
    );
}

#[tokio::test]
async fn test_get_company_bad_fields_before_lookup() {
    let app = TestApp::new();

    let response = app
        .server
        .get(&format!("/api/companies/{}?fields=founder", Uuid::new_v4()))
        .await;

    assert_problem(&response, 400);
}

#[tokio::test]
async fn test_get_missing_company() {
    let app = TestApp::new();

    let response = app
        .server
        .get(&format!("/api/companies/{}", Uuid::new_v4()))
        .await;

    assert_problem(&response, 404);
}

#[tokio::test]
async fn test_get_company_with_malformed_id() {
    let app = TestApp::new();

    let response = app.server.get("/api/companies/not-a-uuid").await;

    assert_status(&response, 400);
}

// =============================================================================
// Creation
// =============================================================================

fn json_bytes(value: &Value) -> Bytes {
    Bytes::from(serde_json::to_vec(value).unwrap())
}

#[tokio::test]
async fn test_create_company() {
    let app = TestApp::new();

    let response = app
        .server
        .post("/api/companies")
        .json(&company_body("Sheffield Health"))
        .await;

    assert_status(&response, 201);
    let body: Value = response.json();
    let id = body["id"].as_str().unwrap().to_string();
    assert_eq!(body["name"], "Sheffield Health");
    assert_eq!(body["location"], "Sheffield");
    assert_eq!(
        relations(&body["links"]),
        vec!["self", "delete_company", "create_product_for_company", "products"]
    );
    assert_eq!(
        assert_location(&response),
        format!("{BASE_URL}/api/companies/{id}")
    );

    let read = app.server.get(&format!("/api/companies/{id}")).await;
    assert_status(&read, 200);
}

#[tokio::test]
async fn test_create_company_with_products() {
    let app = TestApp::new();
    let mut body = company_body("Ward Systems");
    body["products"] = json!([{ "name": "Triage" }, { "name": "Handover" }]);

    let response = app.server.post("/api/companies").json(&body).await;
    assert_status(&response, 201);
    let id = response.json::<Value>()["id"].as_str().unwrap().to_string();

    let products = app
        .server
        .get(&format!("/api/companies/{id}/products"))
        .await;
    assert_eq!(names(&products.json::<Value>()["value"]), vec!["Handover", "Triage"]);
}

#[tokio::test]
async fn test_create_company_vendor_media_type() {
    let app = TestApp::new();

    let response = app
        .server
        .post("/api/companies")
        .bytes(json_bytes(&company_body("Vendor Co")))
        .content_type("application/vnd.marvin.company.full+json")
        .await;

    assert_status(&response, 201);
}

#[tokio::test]
async fn test_create_company_with_location_requires_location() {
    let app = TestApp::new();
    let body = json!({ "name": "Nowhere Ltd", "startDate": "2001-03-15T00:00:00Z" });

    let response = app
        .server
        .post("/api/companies")
        .bytes(json_bytes(&body))
        .content_type("application/vnd.marvin.companywithlocation.full+json")
        .await;

    assert_eq!(
        assert_validation_error(&response, "location"),
        vec!["The company needs a location."]
    );
}

#[tokio::test]
async fn test_create_demised_company() {
    let app = TestApp::new();
    let mut body = company_body("Gone Health");
    body["startDate"] = json!("2000-01-01T00:00:00Z");

    let missing = app
        .server
        .post("/api/companies")
        .bytes(json_bytes(&body))
        .content_type("application/vnd.marvin.demisedcompany.full+json")
        .await;
    assert_validation_error(&missing, "dateOfDemise");

    body["dateOfDemise"] = json!("2010-06-01T00:00:00Z");
    let created = app
        .server
        .post("/api/companies")
        .bytes(json_bytes(&body))
        .content_type("application/vnd.marvin.companywithdateofdemise.full+json")
        .await;
    assert_status(&created, 201);
    assert_eq!(created.json::<Value>()["age"], 10);
}

#[tokio::test]
async fn test_create_company_unsupported_media_type() {
    let app = TestApp::new();

    let response = app
        .server
        .post("/api/companies")
        .bytes(Bytes::from_static(b"name,startDate"))
        .content_type("text/csv")
        .await;

    assert_problem(&response, 415);
}

#[tokio::test]
async fn test_create_company_validation() {
    let app = TestApp::new();

    let response = app
        .server
        .post("/api/companies")
        .json(&json!({ "location": "Hull" }))
        .await;
    assert_eq!(
        assert_validation_error(&response, "name"),
        vec!["The company needs a name."]
    );
    assert_validation_error(&response, "startDate");

    let long_name = "x".repeat(51);
    let response = app
        .server
        .post("/api/companies")
        .json(&company_body(&long_name))
        .await;
    assert_eq!(
        assert_validation_error(&response, "name"),
        vec!["The name shouldn't be longer than 50 characters."]
    );
}

#[tokio::test]
async fn test_create_company_nested_product_errors() {
    let app = TestApp::new();
    let mut body = company_body("Nested Errors");
    body["products"] = json!([{ "name": "Fine" }, { "name": "  " }]);

    let response = app.server.post("/api/companies").json(&body).await;

    assert_validation_error(&response, "products[1].name");
    assert_eq!(app.backend.company_count(), 0);
}

#[tokio::test]
async fn test_create_company_malformed_json() {
    let app = TestApp::new();

    let response = app
        .server
        .post("/api/companies")
        .bytes(Bytes::from_static(b"{\"name\": "))
        .content_type("application/json")
        .await;

    assert_problem(&response, 400);
}

#[tokio::test]
async fn test_post_to_existing_company_conflicts() {
    let companies = sample_companies();
    let id = companies[0].id;
    let app = TestApp::with_companies(companies);

    let existing = app.server.post(&format!("/api/companies/{id}")).await;
    assert_problem(&existing, 409);

    let missing = app
        .server
        .post(&format!("/api/companies/{}", Uuid::new_v4()))
        .await;
    assert_problem(&missing, 404);
}

// =============================================================================
// Update and delete
// =============================================================================

#[tokio::test]
async fn test_update_company() {
    let companies = sample_companies();
    let id = companies[1].id;
    let app = TestApp::with_companies(companies);

    let response = app
        .server
        .put(&format!("/api/companies/{id}"))
        .json(&json!({
            "name": "CareCode Group",
            "location": "Hull",
            "startDate": "2012-06-01T00:00:00Z"
        }))
        .await;
    assert_status(&response, 204);

    let read: Value = app.server.get(&format!("/api/companies/{id}")).await.json();
    assert_eq!(read["name"], "CareCode Group");
    assert_eq!(read["location"], "Hull");
}

#[tokio::test]
async fn test_update_company_errors() {
    let companies = sample_companies();
    let id = companies[1].id;
    let app = TestApp::with_companies(companies);

    let invalid = app
        .server
        .put(&format!("/api/companies/{id}"))
        .json(&json!({ "name": "", "startDate": "2012-06-01T00:00:00Z" }))
        .await;
    assert_eq!(
        assert_validation_error(&invalid, "name"),
        vec!["You must enter a name."]
    );

    let missing = app
        .server
        .put(&format!("/api/companies/{}", Uuid::new_v4()))
        .json(&json!({ "name": "Ghost", "startDate": "2012-06-01T00:00:00Z" }))
        .await;
    assert_problem(&missing, 404);
}

#[tokio::test]
async fn test_patch_company() {
    let companies = sample_companies();
    let id = companies[1].id;
    let app = TestApp::with_companies(companies);

    let response = app
        .server
        .patch(&format!("/api/companies/{id}"))
        .bytes(json_bytes(&json!([
            { "op": "replace", "path": "/name", "value": "CareCode Cloud" }
        ])))
        .content_type("application/json-patch+json")
        .await;
    assert_status(&response, 204);

    let read: Value = app.server.get(&format!("/api/companies/{id}")).await.json();
    assert_eq!(read["name"], "CareCode Cloud");
    assert_eq!(read["location"], "York");
}

#[tokio::test]
async fn test_patch_company_errors() {
    let companies = sample_companies();
    let id = companies[1].id;
    let app = TestApp::with_companies(companies);
    let uri = format!("/api/companies/{id}");

    let emptied = app
        .server
        .patch(&uri)
        .json(&json!([{ "op": "replace", "path": "/name", "value": "" }]))
        .await;
    assert_validation_error(&emptied, "name");

    let bad_path = app
        .server
        .patch(&uri)
        .json(&json!([{ "op": "replace", "path": "/founder", "value": "Ada" }]))
        .await;
    assert_validation_error(&bad_path, "patch");

    let malformed = app
        .server
        .patch(&uri)
        .json(&json!({ "op": "replace" }))
        .await;
    assert_problem(&malformed, 400);

    let missing = app
        .server
        .patch(&format!("/api/companies/{}", Uuid::new_v4()))
        .json(&json!([]))
        .await;
    assert_problem(&missing, 404);
}

#[tokio::test]
async fn test_delete_company() {
    let companies = sample_companies();
    let id = companies[0].id;
    let app = TestApp::with_companies(companies);

    let response = app.server.delete(&format!("/api/companies/{id}")).await;
    assert_status(&response, 204);
    assert_eq!(app.backend.company_count(), 3);

    let again = app.server.delete(&format!("/api/companies/{id}")).await;
    assert_problem(&again, 404);
}

#[tokio::test]
async fn test_delete_all_companies() {
    let app = TestApp::with_companies(numbered_companies());

    let response = app.server.delete("/api/companies").await;

    assert_status(&response, 204);
    assert_eq!(app.backend.company_count(), 0);
}

#[tokio::test]
async fn test_companies_options() {
    let app = TestApp::new();

    let response = app.server.method(Method::OPTIONS, "/api/companies").await;

    assert_status(&response, 200);
    assert_allow(&response, "GET,OPTIONS,POST,PUT");
}

// =============================================================================
// Configuration and failures
// =============================================================================

#[tokio::test]
async fn test_configured_base_url_and_defaults() {
    let config = ServerConfig {
        base_url: "https://listing.example.org/".to_string(),
        default_page_size: 5,
        ..ServerConfig::for_testing()
    };
    let app = TestApp::with_backend(
        hsl_persistence::backends::memory::InMemoryBackend::with_companies(numbered_companies()),
        config,
    );

    let response = app.server.get("/api/companies").await;

    assert_eq!(names(&response.json()), company_names(1, 5));
    assert_eq!(
        pagination(&response)["nextPageLink"],
        "https://listing.example.org/api/companies?orderBy=Name&pageNumber=2&pageSize=5"
    );
}

#[tokio::test]
async fn test_backend_failure_is_internal_error() {
    let app = TestApp::with_backend(FailingStorage, ServerConfig::for_testing());

    let response = app.server.get("/api/companies").await;

    let body = assert_problem(&response, 500);
    assert_eq!(
        body["detail"],
        "An unexpected fault happened. Try again later."
    );
}

#[cfg(feature = "sqlite")]
#[tokio::test]
async fn test_listing_over_sqlite() {
    use hsl_persistence::backends::sqlite::SqliteBackend;
    use hsl_persistence::core::ListingStorage;

    let backend = SqliteBackend::in_memory().expect("Failed to create SQLite backend");
    backend.init_schema().expect("Failed to init schema");
    for company in numbered_companies() {
        backend.add_company(company).await.expect("Failed to seed company");
    }
    let app = TestApp::with_backend(backend, ServerConfig::for_testing());

    let response = app
        .server
        .get("/api/companies?pageNumber=3&orderBy=name%20desc")
        .await;

    assert_status(&response, 200);
    let mut expected = company_names(1, 5);
    expected.reverse();
    assert_eq!(names(&response.json()), expected);
}
