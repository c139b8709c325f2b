use super::*;
use crate::scene::delegate::StaticDelegate;
use serde_json::json;

fn desc(v: serde_json::Value) -> Descriptor {
    Descriptor::from_value(v).unwrap()
}

fn tags(urls: &BTreeMap<ResourceUrl, ResourceTag>) -> Vec<(&str, ResourceTag)> {
    urls.iter().map(|(u, t)| (u.as_str(), *t)).collect()
}

#[test]
fn collects_sources_recursively_against_base() {
    let mut delegate = StaticDelegate::new();
    delegate.base_url = Some(ResourceUrl::new("https://cdn.example.com/deck/scene.json"));
    let root = desc(json!({
        "img": "bg.png",
        "elements": [
            {"mask": "m.png", "elements": [{"sprite": "/sheets/s.png"}]},
            {"video": "intro.mp4"},
            {"to": {"img": ["f1.png", "f2.png"]}}
        ]
    }));

    let urls = collect_resource_urls(&root, &delegate);
    assert_eq!(
        tags(&urls),
        vec![
            ("https://cdn.example.com/deck/bg.png", ResourceTag::Plain),
            ("https://cdn.example.com/deck/f1.png", ResourceTag::Plain),
            ("https://cdn.example.com/deck/f2.png", ResourceTag::Plain),
            ("https://cdn.example.com/deck/intro.mp4", ResourceTag::Movie),
            ("https://cdn.example.com/deck/m.png", ResourceTag::Plain),
            ("https://cdn.example.com/sheets/s.png", ResourceTag::Plain),
        ]
    );
    assert_eq!(urls.values().filter(|t| t.extension_hint() == ".mov").count(), 1);
}

#[test]
fn streaming_descriptors_are_excluded_at_every_depth() {
    let delegate = StaticDelegate::new();
    let root = desc(json!({
        "video": "live.m3u8", "stream": true,
        "elements": [
            {"video": "nested.m3u8", "img": "poster.png", "stream": true},
            {"radio": "station.mp3"},
            {"img": "kept.png"}
        ]
    }));
    assert_eq!(
        tags(&collect_resource_urls(&root, &delegate)),
        vec![("kept.png", ResourceTag::Plain)]
    );
}

#[test]
fn prototype_sources_are_included() {
    let mut delegate = StaticDelegate::new();
    delegate
        .prototypes
        .insert("logo".to_owned(), desc(json!({"img": "logo.png"})));
    delegate
        .prototypes
        .insert("live".to_owned(), desc(json!({"stream": true})));
    let root = desc(json!({"elements": [
        {"element": "logo"},
        {"element": "live", "video": "feed.mp4"},
        {"element": "unknown", "mask": "m.png"}
    ]}));
    assert_eq!(
        tags(&collect_resource_urls(&root, &delegate)),
        vec![
            ("logo.png", ResourceTag::Plain),
            ("m.png", ResourceTag::Plain)
        ]
    );
}

#[test]
fn blank_and_non_string_sources_are_ignored() {
    let delegate = StaticDelegate::new();
    let root = desc(json!({"img": "  ", "mask": 3, "video": null}));
    assert!(collect_resource_urls(&root, &delegate).is_empty());
}
