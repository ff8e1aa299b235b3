use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crowns_protocol as wire;

/// One catalog entry, normalized from the wire shape.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColorSwatch {
    pub id: Option<String>,
    pub collection: String,
    pub name: String,
    pub description: String,
    pub brand: String,
    pub tone: String,
    pub rooted: bool,
    pub highlighted: bool,
    pub code: Option<String>,
    pub images: Vec<String>,
    pub video: Option<String>,
}

impl From<wire::ColorRecord> for ColorSwatch {
    fn from(record: wire::ColorRecord) -> Self {
        Self {
            id: record.id,
            collection: record.collection,
            name: record.name,
            description: record.description,
            brand: record.brand,
            tone: record.tone,
            rooted: record.rooted,
            highlighted: record.highlighted,
            code: record.code,
            images: record.image,
            video: record.video,
        }
    }
}

/// Facet and free-text filtering for the catalog page.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct CatalogFilter {
    /// Exact collection to show; `None` shows all of them.
    pub collection: Option<String>,
    /// Exact brand to show; `None` shows all of them.
    pub brand: Option<String>,
    /// Case-insensitive text matched against collection, name, description
    /// and brand.
    pub query: String,
}

impl CatalogFilter {
    pub fn matches(&self, swatch: &ColorSwatch) -> bool {
        if let Some(collection) = &self.collection {
            if &swatch.collection != collection {
                return false;
            }
        }
        if let Some(brand) = &self.brand {
            if &swatch.brand != brand {
                return false;
            }
        }
        if self.query.is_empty() {
            return true;
        }
        let query = self.query.to_lowercase();
        [
            &swatch.collection,
            &swatch.name,
            &swatch.description,
            &swatch.brand,
        ]
        .into_iter()
        .any(|field| field.to_lowercase().contains(&query))
    }
}

/// Distinct collection names, sorted. Empty values are not facets.
pub fn collections(swatches: &[ColorSwatch]) -> Vec<String> {
    facet(swatches, |swatch| &swatch.collection)
}

/// Distinct brand names, sorted.
pub fn brands(swatches: &[ColorSwatch]) -> Vec<String> {
    facet(swatches, |swatch| &swatch.brand)
}

fn facet<'a>(
    swatches: &'a [ColorSwatch],
    field: impl Fn(&'a ColorSwatch) -> &'a String,
) -> Vec<String> {
    let mut values: Vec<String> = swatches
        .iter()
        .map(field)
        .filter(|value| !value.is_empty())
        .cloned()
        .collect();
    values.sort();
    values.dedup();
    values
}

/// Swatches that pass the filter, grouped by collection in sorted order.
pub fn group_by_collection<'a>(
    swatches: &'a [ColorSwatch],
    filter: &CatalogFilter,
) -> Vec<(String, Vec<&'a ColorSwatch>)> {
    let mut groups: BTreeMap<String, Vec<&ColorSwatch>> = BTreeMap::new();
    for swatch in swatches.iter().filter(|swatch| filter.matches(swatch)) {
        groups.entry(swatch.collection.clone()).or_default().push(swatch);
    }
    groups.into_iter().collect()
}

/// Extracts the 11-character video id from the YouTube URL shapes the
/// catalog actually contains: watch links, short youtu.be links, embeds
/// and bare `/v/` paths.
pub fn youtube_id(url: &str) -> Option<&str> {
    const MARKERS: [&str; 5] = ["youtu.be/", "embed/", "watch?v=", "&v=", "/v/"];

    let (_, rest) = MARKERS
        .iter()
        .filter_map(|marker| {
            url.find(marker)
                .map(|at| (at, &url[at + marker.len()..]))
        })
        .min_by_key(|&(at, _)| at)?;

    let end = rest.find(['#', '&', '?']).unwrap_or(rest.len());
    let id = &rest[..end];
    (id.len() == 11).then_some(id)
}

#[cfg(test)]
mod tests {
    use alloc::borrow::ToOwned;
    use alloc::vec;

    use super::*;

    fn swatch(collection: &str, name: &str, brand: &str, description: &str) -> ColorSwatch {
        ColorSwatch {
            id: None,
            collection: collection.to_owned(),
            name: name.to_owned(),
            description: description.to_owned(),
            brand: brand.to_owned(),
            tone: "warm".to_owned(),
            rooted: false,
            highlighted: false,
            code: None,
            images: vec![],
            video: None,
        }
    }

    fn catalog() -> Vec<ColorSwatch> {
        vec![
            swatch("Naturals", "Honey Blonde", "Boss", "Rich honey blend"),
            swatch("Naturals", "Espresso", "Crown Co", "Deep brown"),
            swatch("Fantasy", "Lilac Dream", "Boss", "Pastel purple"),
        ]
    }

    #[test]
    fn facets_are_distinct_and_sorted() {
        let swatches = catalog();
        assert_eq!(collections(&swatches), vec!["Fantasy", "Naturals"]);
        assert_eq!(brands(&swatches), vec!["Boss", "Crown Co"]);
    }

    #[test]
    fn empty_values_do_not_become_facets() {
        let swatches = vec![swatch("", "Nameless", "", "mystery")];
        assert!(collections(&swatches).is_empty());
        assert!(brands(&swatches).is_empty());
    }

    #[test]
    fn the_collection_facet_matches_exactly() {
        let filter = CatalogFilter {
            collection: Some("Naturals".to_owned()),
            ..Default::default()
        };
        let swatches = catalog();
        let groups = group_by_collection(&swatches, &filter);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].0, "Naturals");
        assert_eq!(groups[0].1.len(), 2);
    }

    #[test]
    fn the_query_is_case_insensitive_over_all_text_fields() {
        let swatches = catalog();
        let by_description = CatalogFilter {
            query: "HONEY".to_owned(),
            ..Default::default()
        };
        assert!(by_description.matches(&swatches[0]));
        assert!(!by_description.matches(&swatches[1]));

        let by_brand = CatalogFilter {
            query: "crown co".to_owned(),
            ..Default::default()
        };
        assert!(by_brand.matches(&swatches[1]));
    }

    #[test]
    fn an_empty_filter_matches_everything() {
        let swatches = catalog();
        let groups = group_by_collection(&swatches, &CatalogFilter::default());
        let total: usize = groups.iter().map(|(_, members)| members.len()).sum();

        assert_eq!(total, swatches.len());
        assert_eq!(groups[0].0, "Fantasy");
    }

    #[test]
    fn facets_and_query_combine() {
        let filter = CatalogFilter {
            collection: Some("Naturals".to_owned()),
            brand: Some("Boss".to_owned()),
            query: "honey".to_owned(),
        };
        let swatches = catalog();
        let groups = group_by_collection(&swatches, &filter);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].1.len(), 1);
        assert_eq!(groups[0].1[0].name, "Honey Blonde");
    }

    #[test]
    fn youtube_ids_come_out_of_the_common_url_shapes() {
        assert_eq!(
            youtube_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ")
        );
        assert_eq!(
            youtube_id("https://youtu.be/dQw4w9WgXcQ?t=10"),
            Some("dQw4w9WgXcQ")
        );
        assert_eq!(
            youtube_id("https://www.youtube.com/embed/dQw4w9WgXcQ#start"),
            Some("dQw4w9WgXcQ")
        );
        assert_eq!(
            youtube_id("https://www.youtube.com/watch?list=x&v=dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ")
        );
    }

    #[test]
    fn other_urls_yield_no_video_id() {
        assert_eq!(youtube_id("https://vimeo.com/123456"), None);
        assert_eq!(youtube_id("https://youtu.be/short"), None);
        assert_eq!(youtube_id(""), None);
    }
}
