use super::*;

fn base(s: &str) -> ResourceUrl {
    ResourceUrl::new(s)
}

#[test]
fn absolute_sources_ignore_base() {
    let b = base("https://cdn.example.com/doc/index.swipe");
    let u = ResourceUrl::resolve("http://other.net/a.png", Some(&b)).unwrap();
    assert_eq!(u.as_str(), "http://other.net/a.png");
}

#[test]
fn relative_sources_join_base_directory() {
    let b = base("https://cdn.example.com/doc/index.swipe");
    let u = ResourceUrl::resolve("img/../media/a.png", Some(&b)).unwrap();
    assert_eq!(u.as_str(), "https://cdn.example.com/doc/media/a.png");

    let u = ResourceUrl::resolve("/root.png", Some(&b)).unwrap();
    assert_eq!(u.as_str(), "https://cdn.example.com/root.png");
}

#[test]
fn bare_paths_without_base_are_kept() {
    let u = ResourceUrl::resolve("  a/b.png ", None).unwrap();
    assert_eq!(u.as_str(), "a/b.png");
    assert!(!u.is_absolute());
    assert_eq!(u.to_file_path(), Some(PathBuf::from("a/b.png")));
    assert!(ResourceUrl::resolve("   ", None).is_none());
}

#[test]
fn file_urls_map_to_paths() {
    let u = base("file:///tmp/x/y.gif");
    assert_eq!(u.to_file_path(), Some(PathBuf::from("/tmp/x/y.gif")));
    assert_eq!(u.extension().as_deref(), Some("gif"));
    assert_eq!(base("https://a.b/c.MOV?x=1").extension().as_deref(), Some("mov"));
    assert_eq!(base("https://a.b/c.png").to_file_path(), None);
}

#[test]
fn drive_letters_are_not_schemes() {
    assert!(!base("C:/media/a.png").is_absolute());
}
