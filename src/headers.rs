use http_client::Request;

/// User agent sent with every API request
const USER_AGENT: &str = concat!("festune/", env!("CARGO_PKG_VERSION"));

/// Add the headers shared by every API request
pub fn add_common_headers(request: &mut Request, access_token: &str) {
    let _ = request.insert_header("User-Agent", USER_AGENT);
    let _ = request.insert_header("Accept", "application/json");
    let _ = request.insert_header("Authorization", format!("Bearer {access_token}").as_str());
}

/// Add headers for requests carrying a JSON body
pub fn add_json_headers(request: &mut Request, access_token: &str) {
    add_common_headers(request, access_token);
    let _ = request.insert_header("Content-Type", "application/json");
}
