use std::collections::BTreeMap;

use crate::{
    descriptor::{
        inherit::inherit_properties,
        url::ResourceUrl,
        value::{Descriptor, Fields},
    },
    scene::delegate::ElementDelegate,
};

/// What kind of media a collected URL refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceTag {
    /// Image, mask, sprite sheet, or image-sequence frame.
    Plain,
    /// Video file to be cached before playback.
    Movie,
}

impl ResourceTag {
    /// File-extension hint for the caching collaborator.
    pub fn extension_hint(self) -> &'static str {
        match self {
            Self::Plain => "",
            Self::Movie => ".mov",
        }
    }
}

const SOURCE_KEYS: [(&str, ResourceTag); 4] = [
    ("img", ResourceTag::Plain),
    ("mask", ResourceTag::Plain),
    ("sprite", ResourceTag::Plain),
    ("video", ResourceTag::Movie),
];

/// Every external media URL referenced by `desc` and its descendants.
///
/// Sources of a descriptor marked `stream: true` are skipped, as are `radio` sources; its
/// children are still visited. Prototypes are merged before each descriptor is read. No
/// layout or media access happens.
#[tracing::instrument(skip_all)]
pub fn collect_resource_urls(
    desc: &Descriptor,
    delegate: &dyn ElementDelegate,
) -> BTreeMap<ResourceUrl, ResourceTag> {
    let base = delegate.base_url();
    let mut urls = BTreeMap::new();
    collect_into(desc, delegate, base.as_ref(), &mut urls);
    tracing::debug!(count = urls.len(), "resources collected");
    urls
}

fn collect_into(
    desc: &Descriptor,
    delegate: &dyn ElementDelegate,
    base: Option<&ResourceUrl>,
    urls: &mut BTreeMap<ResourceUrl, ResourceTag>,
) {
    let prototype = desc.string("element").and_then(|name| delegate.prototype(name));
    let info = inherit_properties(desc, prototype.as_ref());

    if info.flag("stream") {
        tracing::debug!("streaming sources are not collected");
    } else {
        for (key, tag) in SOURCE_KEYS {
            if let Some(url) = info.string(key).and_then(|src| ResourceUrl::resolve(src, base)) {
                urls.insert(url, tag);
            }
        }
        let frames = info
            .record("to")
            .and_then(|to| to.strings("img"))
            .unwrap_or_default();
        for src in frames {
            if let Some(url) = ResourceUrl::resolve(&src, base) {
                urls.entry(url).or_insert(ResourceTag::Plain);
            }
        }
    }

    for child in info.children() {
        collect_into(&child, delegate, base, urls);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/resources/collector.rs"]
mod tests;
