//! Overpass QL query construction.
//!
//! The query is a single union of tag filters, each applied to the
//! bounding box, followed by `out body geom;` so ways carry their inline
//! geometry for road length computation.

use std::fmt::Write as _;

use urban_map_region_models::BoundingBox;

/// OSM element kinds a filter applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ElementKinds {
    /// `node`, `way`, and `relation`.
    All,
    /// `node` and `way`.
    NodesAndWays,
    /// `way` only.
    Ways,
}

impl ElementKinds {
    const fn names(self) -> &'static [&'static str] {
        match self {
            Self::All => &["node", "way", "relation"],
            Self::NodesAndWays => &["node", "way"],
            Self::Ways => &["way"],
        }
    }
}

/// A commented group of tag filters in the union.
struct FilterGroup {
    label: &'static str,
    filters: &'static [(&'static str, ElementKinds)],
}

const FILTER_GROUPS: &[FilterGroup] = &[
    FilterGroup {
        label: "Healthcare",
        filters: &[(
            r#"["amenity"~"hospital|clinic|doctors|pharmacy"]"#,
            ElementKinds::All,
        )],
    },
    FilterGroup {
        label: "Police",
        filters: &[(r#"["amenity"="police"]"#, ElementKinds::All)],
    },
    FilterGroup {
        label: "Fire",
        filters: &[(r#"["amenity"="fire_station"]"#, ElementKinds::All)],
    },
    FilterGroup {
        label: "Schools",
        filters: &[(r#"["amenity"="school"]"#, ElementKinds::All)],
    },
    FilterGroup {
        label: "Parks",
        filters: &[(r#"["leisure"="park"]"#, ElementKinds::All)],
    },
    FilterGroup {
        label: "Highways (for length)",
        filters: &[(r#"["highway"]"#, ElementKinds::Ways)],
    },
    FilterGroup {
        label: "Transit stops",
        filters: &[
            (r#"["highway"="bus_stop"]"#, ElementKinds::NodesAndWays),
            (r#"["railway"~"station|halt|stop"]"#, ElementKinds::NodesAndWays),
            (
                r#"["public_transport"~"stop_position|platform"]"#,
                ElementKinds::NodesAndWays,
            ),
        ],
    },
];

/// Builds the Overpass QL query for `bbox` with a server-side timeout hint
/// of `timeout_secs`.
#[must_use]
pub fn build_query(bbox: &BoundingBox, timeout_secs: u64) -> String {
    let bbox = bbox.to_query_string();
    let mut query = format!("[out:json][timeout:{timeout_secs}];\n(\n");

    for group in FILTER_GROUPS {
        let _ = writeln!(query, "  // {}", group.label);
        for (filter, kinds) in group.filters {
            for kind in kinds.names() {
                let _ = writeln!(query, "  {kind}{filter}({bbox});");
            }
        }
    }

    query.push_str(");\nout body geom;\n");
    query
}
