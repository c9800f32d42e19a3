use contracts::domain::a001_catalog_item::{parse_catalog_items, CatalogItem};
use gloo_net::http::Request;

/// Загружает записи каталога одним GET-запросом
pub async fn fetch_catalog_items(url: &str) -> Result<Vec<CatalogItem>, String> {
    log::debug!("Loading catalog items from {}", url);

    let response = Request::get(url)
        .header("Accept", "application/json")
        .send()
        .await
        .map_err(|e| format!("Failed to fetch data: {}", e))?;

    if !response.ok() {
        return Err(status_error(response.status()));
    }

    let text = response
        .text()
        .await
        .map_err(|e| format!("Failed to read response: {}", e))?;

    let items = parse_catalog_items(&text).map_err(|e| format!("{:#}", e))?;
    log::info!("Loaded {} catalog items", items.len());
    Ok(items)
}

/// Сообщение для ответа с не-2xx статусом
fn status_error(status: u16) -> String {
    format!("Network response was not ok (HTTP {})", status)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error() {
        assert_eq!(status_error(404), "Network response was not ok (HTTP 404)");
        assert_eq!(status_error(500), "Network response was not ok (HTTP 500)");
    }
}
