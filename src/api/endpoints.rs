//! Request paths, relative to the data host.

/// `GET /System/List?Init={page}&Total=true&Limit={size}`
pub fn systems_page(page: u32, page_size: u32) -> String {
    format!("/System/List?Init={}&Total=true&Limit={}", page, page_size)
}

/// `GET /Atlas/BySystem/{id}?Init={page}&Limit={size}`, plus `&Total=true`
/// after the first page.
pub fn atlases_page(system_id: i64, page: u32, page_size: u32) -> String {
    let mut path = format!(
        "/Atlas/BySystem/{}?Init={}&Limit={}",
        system_id, page, page_size
    );
    if page > 1 {
        path.push_str("&Total=true");
    }
    path
}

/// `GET /Atlas/{imei}`
pub fn atlas(imei: &str) -> String {
    format!("/Atlas/{}", encode_segment(imei))
}

// IMEIs are digits, but the value comes from user input on the CLI.
fn encode_segment(raw: &str) -> String {
    raw.bytes()
        .map(|b| match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                (b as char).to_string()
            }
            other => format!("%{:02X}", other),
        })
        .collect()
}
