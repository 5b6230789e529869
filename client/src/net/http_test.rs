use super::*;

#[test]
fn request_url_prefixes_base() {
    assert_eq!(request_url("", "/api/game/g1"), "/api/game/g1");
    assert_eq!(request_url("http://localhost:8080", "/api/game/g1/flip"), "http://localhost:8080/api/game/g1/flip");
}

#[test]
fn transport_keeps_base() {
    assert_eq!(HttpTransport::new("http://api").base(), "http://api");
    assert_eq!(HttpTransport::default().base(), "");
}

#[cfg(not(feature = "csr"))]
#[test]
fn host_builds_report_network_error() {
    let transport = HttpTransport::default();
    let request = ApiRequest { method: game::Method::Get, path: "/api/game/g1".to_owned(), body: None };
    let err = futures::executor::block_on(transport.send(request)).expect_err("no browser");
    assert_eq!(err, SyncError::Network(UNAVAILABLE.to_owned()));
}
