use axum::http::{Method, StatusCode};
use serde_json::Value;

use crate::build_app;
use crate::tests::common::{create_routing, send};

fn json(body: &str) -> Value {
    serde_json::from_str(body).expect("Response should be JSON")
}

#[tokio::test]
async fn test_current_locale_default() {
    let app = build_app(&create_routing("en", &["ru", "zh-CHS"]));

    let response = send(&app, Method::GET, "/").await;
    assert_eq!(response.status, StatusCode::OK);

    let body = json(&response.body);
    assert_eq!(body["code"], "en");
    assert_eq!(body["default_locale"], "en");
    assert_eq!(body["using_default"], true);
    assert_eq!(body["home"], "/");
    assert_eq!(body["display_name"]["full"], "English");
}

#[tokio::test]
async fn test_current_locale_prefixed() {
    let app = build_app(&create_routing("en", &["ru", "zh-CHS"]));

    let body = json(&send(&app, Method::GET, "/zh-chs/").await.body);
    assert_eq!(body["code"], "zh-CHS");
    assert_eq!(body["using_default"], false);
    assert_eq!(body["home"], "/zh-CHS/");
    assert_eq!(body["native_name"]["full"], "中文（简体）");
}

#[tokio::test]
async fn test_list_locales_links() {
    let app = build_app(&create_routing("en", &["ru", "zh-CHS"]));

    let body = json(&send(&app, Method::GET, "/ru/locales").await.body);
    let links = body.as_array().unwrap();
    assert_eq!(links.len(), 3);

    let find = |code: &str| links.iter().find(|link| link["code"] == code).unwrap().clone();
    assert_eq!(find("en")["href"], "/");
    assert_eq!(find("ru")["href"], "/ru/");
    assert_eq!(find("ru")["active"], true);
    assert_eq!(find("zh-CHS")["href"], "/zh-CHS/");
    assert_eq!(find("zh-CHS")["active"], false);
}

#[tokio::test]
async fn test_switch_locale() {
    let app = build_app(&create_routing("en", &["ru", "zh-CHS"]));

    let response = send(&app, Method::POST, "/ru/locale/zh-chs").await;
    assert_eq!(response.status, StatusCode::OK);
    let body = json(&response.body);
    assert_eq!(body["code"], "zh-CHS");
    assert_eq!(body["home"], "/zh-CHS/");
    assert_eq!(response.locale.unwrap().code(), "zh-CHS");
}

#[tokio::test]
async fn test_switch_locale_unknown() {
    let app = build_app(&create_routing("en", &["ru"]));

    let response = send(&app, Method::POST, "/locale/xx").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    let body = json(&response.body);
    assert_eq!(body["code"], 3001);
    assert_eq!(body["message"], "Locale not found: xx");
}
