//! Festival codes reference resource (static JSON).
//!
//! Lists the festival codes accepted by the `festival` argument of the
//! search tools.

use serde::Serialize;

use super::ResourceDefinition;
use crate::domains::resources::service::ResourceContent;

/// A festival known to the festivals API.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Festival {
    /// Code sent as the `festival` query parameter.
    pub code: &'static str,
    pub name: &'static str,
}

/// Every festival code accepted by the API.
pub const FESTIVALS: &[Festival] = &[
    Festival {
        code: "fringe",
        name: "Edinburgh Festival Fringe",
    },
    Festival {
        code: "demofringe",
        name: "Edinburgh Festival Fringe (demo dataset)",
    },
    Festival {
        code: "jazz",
        name: "Edinburgh Jazz & Blues Festival",
    },
    Festival {
        code: "book",
        name: "Edinburgh International Book Festival",
    },
    Festival {
        code: "international",
        name: "Edinburgh International Festival",
    },
    Festival {
        code: "tattoo",
        name: "Royal Edinburgh Military Tattoo",
    },
    Festival {
        code: "art",
        name: "Edinburgh Art Festival",
    },
    Festival {
        code: "hogmanay",
        name: "Edinburgh's Hogmanay",
    },
    Festival {
        code: "science",
        name: "Edinburgh Science Festival",
    },
    Festival {
        code: "imaginate",
        name: "Edinburgh International Children's Festival",
    },
    Festival {
        code: "film",
        name: "Edinburgh International Film Festival",
    },
    Festival {
        code: "mela",
        name: "Edinburgh Mela",
    },
    Festival {
        code: "storytelling",
        name: "Scottish International Storytelling Festival",
    },
];

/// Festival codes reference (static JSON).
pub struct FestivalCodesResource;

impl FestivalCodesResource {
    /// Template URI for a single festival entry.
    pub const TEMPLATE: &'static str = "edfest://festivals/{code}";

    /// Look up a festival by its code.
    pub fn find(code: &str) -> Option<&'static Festival> {
        FESTIVALS.iter().find(|f| f.code == code)
    }

    /// Extract the festival code from an `edfest://festivals/{code}` URI.
    pub fn code_from_uri(uri: &str) -> Option<&str> {
        uri.strip_prefix("edfest://festivals/")
            .filter(|code| !code.is_empty() && !code.contains('/'))
    }
}

impl ResourceDefinition for FestivalCodesResource {
    const URI: &'static str = "edfest://festivals";
    const NAME: &'static str = "Festival Codes";
    const DESCRIPTION: &'static str =
        "Festival codes accepted by the Edinburgh festival search tools";
    const MIME_TYPE: &'static str = "application/json";

    fn content() -> ResourceContent {
        ResourceContent::Text(serde_json::json!(FESTIVALS).to_string())
    }
}
