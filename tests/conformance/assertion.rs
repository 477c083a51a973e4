use fixassert::error::{Actual, AssertError, CatalogErrorKind, ReportContext};
use fixassert::{
    Catalog, VarMap, apply_merchant_id, assert_fail_response, assert_response, placeholder_name,
    resolve_placeholders, stamp, string_at,
};
use serde_json::json;
use std::path::PathBuf;
use tracing_test::traced_test;

fn fixtures_dir() -> PathBuf {
    std::env::var("FIXASSERT_FIXTURE_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures"))
}

fn open_catalog() -> Catalog {
    Catalog::open(fixtures_dir().join("payment_gateway.json")).unwrap()
}

fn create_order_vars(partner_ref: &str) -> VarMap {
    VarMap::from([("partnerReferenceNo".to_string(), json!(partner_ref))])
}

#[test]
fn create_order_response_passes() {
    let catalog = open_catalog();
    let vars = create_order_vars("ref-20250901-0001");
    let body = json!({
        "responseCode": "2005400",
        "responseMessage": "Successful",
        "referenceNo": "1231000285220250901",
        "partnerReferenceNo": "ref-20250901-0001",
        "webRedirectUrl": "https://pay.example.id/checkout?bizNo=1231000285220250901",
        "additionalInfo": { "paymentType": "SALE" }
    })
    .to_string();

    let payload = assert_response(&catalog, "CreateOrder", "CreateOrderRedirect", &vars, &body)
        .expect("payload should match the fixture");
    assert_eq!(payload["referenceNo"], json!("1231000285220250901"));
}

/// A generated reference from one response feeds the next case's variables.
#[test]
fn query_chains_on_extracted_reference() {
    let catalog = open_catalog();
    let vars = create_order_vars("ref-20250901-0002");
    let create_body = json!({
        "responseCode": "2005400",
        "responseMessage": "Successful",
        "referenceNo": "1231000285220250902",
        "partnerReferenceNo": "ref-20250901-0002",
        "webRedirectUrl": "https://pay.example.id/checkout?bizNo=1231000285220250902"
    })
    .to_string();

    let payload =
        assert_response(&catalog, "CreateOrder", "CreateOrderRedirect", &vars, &create_body)
            .expect("create order should match");
    let reference_no = string_at(&payload, "$.referenceNo").expect("referenceNo is present");

    let query_vars = VarMap::from([
        ("originalPartnerReferenceNo".to_string(), json!("ref-20250901-0002")),
        ("originalReferenceNo".to_string(), json!(reference_no)),
    ]);
    let query_body = json!({
        "responseCode": "2005500",
        "responseMessage": "Successful",
        "originalPartnerReferenceNo": "ref-20250901-0002",
        "originalReferenceNo": "1231000285220250902",
        "serviceCode": "54",
        "transactionStatusDesc": "SUCCESS",
        "transAmount": { "value": "50001.00", "currency": "IDR" },
        "payOptionInfos": [
            { "payMethod": "BALANCE", "payAmount": { "value": "50001.00", "currency": "IDR" } }
        ],
        "paidTime": "2025-09-01T10:00:00+07:00"
    })
    .to_string();

    assert_response(&catalog, "QueryPayment", "QueryPaymentPaidOrder", &query_vars, &query_body)
        .expect("query should match with the extracted reference");
}

#[test]
fn cancel_order_accepts_server_timestamps() {
    let catalog = open_catalog();
    let vars = VarMap::from([(
        "originalPartnerReferenceNo".to_string(),
        json!("ref-20250901-0006"),
    )]);
    let body = json!({
        "responseCode": "2005700",
        "responseMessage": "Successful",
        "originalPartnerReferenceNo": "ref-20250901-0006",
        "originalReferenceNo": "1231000285220250906",
        "cancelTime": "2025-09-01T11:30:00+07:00"
    })
    .to_string();

    let payload = assert_response(&catalog, "CancelOrder", "CancelOrderValid", &vars, &body)
        .expect("cancel should match");
    assert_eq!(payload["cancelTime"], json!("2025-09-01T11:30:00+07:00"));
}

#[test]
fn mismatch_reports_every_difference() {
    let catalog = open_catalog();
    let vars = create_order_vars("ref-20250901-0003");
    let body = json!({
        "responseCode": "2005400",
        "responseMessage": "Pending",
        "referenceNo": "1231000285220250903",
        "partnerReferenceNo": "ref-20250901-0003"
    })
    .to_string();

    let err = assert_response(&catalog, "CreateOrder", "CreateOrderRedirect", &vars, &body)
        .unwrap_err();
    let report = match err {
        AssertError::Mismatch(report) => report,
        other => panic!("expected a mismatch, got {:?}", other),
    };

    assert_eq!(report.context, ReportContext::Response);
    assert_eq!(report.differences.len(), 2);
    assert_eq!(report.differences[0].path, "responseMessage");
    assert_eq!(report.differences[1].path, "webRedirectUrl");
    assert!(matches!(report.differences[1].actual, Actual::Missing));

    let text = report.to_string();
    assert!(text.starts_with("Assertion failed. Differences found at:\n"), "got: {text}");
    assert!(text.contains("Path: responseMessage\n  Expected: \"Successful\"\n  Actual: \"Pending\""));
    assert!(text.contains("Path: webRedirectUrl\n  Expected: \"${valueFromServer}\"\n  Actual: MISSING"));
}

#[test]
fn empty_server_string_fails_the_presence_check() {
    let catalog = open_catalog();
    let vars = create_order_vars("ref-20250901-0004");
    let body = json!({
        "responseCode": "2005400",
        "responseMessage": "Successful",
        "referenceNo": "1231000285220250904",
        "partnerReferenceNo": "ref-20250901-0004",
        "webRedirectUrl": ""
    })
    .to_string();

    let err = assert_response(&catalog, "CreateOrder", "CreateOrderRedirect", &vars, &body)
        .unwrap_err();
    match err {
        AssertError::Mismatch(report) => {
            assert_eq!(report.differences.len(), 1);
            assert_eq!(report.differences[0].path, "webRedirectUrl");
        }
        other => panic!("expected a mismatch, got {:?}", other),
    }
}

#[test]
fn fail_response_parses_formatted_error_message() {
    let catalog = open_catalog();
    let message = format!(
        "400 Bad Request\nHTTP response body: {}",
        json!({
            "responseCode": "4005401",
            "responseMessage": "Invalid Field Format amount.value"
        })
    );

    let payload = assert_fail_response(
        &catalog,
        "CreateOrder",
        "CreateOrderInvalidFieldFormat",
        &VarMap::new(),
        message,
    )
    .expect("error payload should match");
    assert_eq!(payload["responseCode"], json!("4005401"));
}

/// The embedded-body scan takes the first line containing both braces, even
/// when a non-JSON line carries braces ahead of the real body.
#[test]
fn line_scan_takes_the_first_brace_line() {
    let catalog = open_catalog();
    let body = json!({
        "responseCode": "4005401",
        "responseMessage": "Invalid Field Format amount.value"
    });

    let message = format!("400 Bad Request\nerror {{E123}} occurred\nHTTP response body: {body}");
    let err = assert_fail_response(
        &catalog,
        "CreateOrder",
        "CreateOrderInvalidFieldFormat",
        &VarMap::new(),
        message,
    )
    .unwrap_err();
    match err {
        AssertError::Body { raw, .. } => assert_eq!(raw, "error {E123} occurred"),
        other => panic!("expected a body error, got {:?}", other),
    }

    let message = format!("400 Bad Request\nHTTP response body: {body}\ntrace {{span=abc}} tail");
    assert_fail_response(
        &catalog,
        "CreateOrder",
        "CreateOrderInvalidFieldFormat",
        &VarMap::new(),
        message,
    )
    .expect("first brace line is the body");
}

#[test]
fn fail_response_accepts_raw_body_bytes() {
    let catalog = open_catalog();
    let body = json!({
        "responseCode": "4005401",
        "responseMessage": "Invalid Field Format amount.value"
    })
    .to_string();

    assert_fail_response(
        &catalog,
        "CreateOrder",
        "CreateOrderInvalidFieldFormat",
        &VarMap::new(),
        body.into_bytes(),
    )
    .expect("error payload should match");
}

#[test]
fn fail_response_without_json_line_is_explicit() {
    let catalog = open_catalog();
    let err = assert_fail_response(
        &catalog,
        "CreateOrder",
        "CreateOrderInvalidFieldFormat",
        &VarMap::new(),
        "connection reset by peer",
    )
    .unwrap_err();
    assert!(matches!(err, AssertError::NoJsonFragment { .. }), "got {:?}", err);
}

#[test]
fn fail_response_mismatch_uses_the_error_heading() {
    let catalog = open_catalog();
    let body = json!({
        "responseCode": "5005401",
        "responseMessage": "Internal Server Error"
    })
    .to_string();

    let err = assert_fail_response(
        &catalog,
        "CreateOrder",
        "CreateOrderInvalidFieldFormat",
        &VarMap::new(),
        body.into_bytes(),
    )
    .unwrap_err();
    match err {
        AssertError::Mismatch(report) => {
            assert_eq!(report.context, ReportContext::ErrorResponse);
            assert!(
                report
                    .to_string()
                    .starts_with("Assertion failed. Differences found in error response:\n")
            );
        }
        other => panic!("expected a mismatch, got {:?}", other),
    }
}

#[test]
fn malformed_body_echoes_raw_bytes() {
    let catalog = open_catalog();
    let vars = create_order_vars("ref-20250901-0005");
    let err = assert_response(
        &catalog,
        "CreateOrder",
        "CreateOrderRedirect",
        &vars,
        "<html>502 Bad Gateway</html>",
    )
    .unwrap_err();
    match err {
        AssertError::Body { raw, .. } => assert_eq!(raw, "<html>502 Bad Gateway</html>"),
        other => panic!("expected a body error, got {:?}", other),
    }
}

#[test]
fn unknown_case_is_a_catalog_error() {
    let catalog = open_catalog();
    let err = assert_response(&catalog, "CreateOrder", "CreateOrderDeeplink", &VarMap::new(), "{}")
        .unwrap_err();
    match err {
        AssertError::Catalog(e) => assert_eq!(e.kind, CatalogErrorKind::CaseNotFound),
        other => panic!("expected a catalog error, got {:?}", other),
    }
}

/// Sample requests resolve with generated values and an overlaid merchant id.
#[test]
fn sample_request_resolves_for_submission() {
    let catalog = open_catalog();
    let mut request = catalog.request("CreateOrder", "CreateOrderRedirect").unwrap();
    apply_merchant_id(&mut request, "216620000000008888888");
    assert_eq!(request["merchantId"], json!("216620000000008888888"));

    let vars = VarMap::from([
        ("partnerReferenceNo".to_string(), json!(stamp::partner_reference_no())),
        ("validUpTo".to_string(), json!(stamp::formatted_date(3600, 7))),
    ]);
    let resolved = resolve_placeholders(&request, &vars);

    let partner_ref = resolved["partnerReferenceNo"].as_str().unwrap();
    assert!(placeholder_name(partner_ref).is_none(), "still a placeholder: {partner_ref}");
    assert!(resolved["validUpTo"].as_str().unwrap().ends_with("+07:00"));
    assert_eq!(resolved["urlParams"], request["urlParams"]);
}

#[traced_test]
#[test]
fn passing_assertion_logs_the_payload() {
    let catalog = open_catalog();
    let body = json!({
        "responseCode": "4005401",
        "responseMessage": "Invalid Field Format amount.value"
    })
    .to_string();

    assert_fail_response(
        &catalog,
        "CreateOrder",
        "CreateOrderInvalidFieldFormat",
        &VarMap::new(),
        body.into_bytes(),
    )
    .expect("error payload should match");
    assert!(logs_contain("Assertion passed: API error response matches the expected data"));
}
