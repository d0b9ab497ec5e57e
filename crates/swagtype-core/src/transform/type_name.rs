use heck::ToPascalCase;

use crate::config::{BASELINE_VERSION, BusinessConfig};
use crate::ir::HttpMethod;

/// Which side of an operation a synthesized type describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeRole {
    Request,
    Response,
}

impl TypeRole {
    pub fn suffix(&self) -> &'static str {
        match self {
            TypeRole::Request => "ReqType",
            TypeRole::Response => "ResType",
        }
    }
}

/// Build the type name for one side of an operation.
///
/// Order: method, path segments, role suffix, server suffix, version token.
///
/// - `GET /pets/{id}` → `GetPetsIdResType`
/// - `POST /api/user_groups` → `PostUserGroupsReqType`
/// - `GET /orders` at `v2` with suffix `Shop` → `GetOrdersResTypeShopV2`
pub fn synthesize(
    method: HttpMethod,
    url: &str,
    role: TypeRole,
    business: &BusinessConfig,
) -> String {
    let mut name = capitalize(&method.as_str().to_ascii_lowercase());
    for segment in url.split('/').filter(|s| !s.is_empty() && *s != "api") {
        let bare = segment.trim_start_matches('{').trim_end_matches('}');
        name.push_str(&pascal_segment(bare));
    }
    name.push_str(role.suffix());
    if let Some(ref suffix) = business.type_name_suffix {
        name.push_str(suffix);
    }
    if !business.version.eq_ignore_ascii_case(BASELINE_VERSION) {
        name.push_str(&capitalize(&business.version));
    }
    name
}

fn pascal_segment(segment: &str) -> String {
    if segment.contains(['_', '-']) {
        segment.to_pascal_case()
    } else {
        capitalize(segment)
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn business(version: &str, suffix: Option<&str>) -> BusinessConfig {
        BusinessConfig {
            name: "shop".to_string(),
            version: version.to_string(),
            type_name_suffix: suffix.map(String::from),
        }
    }

    #[test]
    fn test_path_param_is_unwrapped() {
        let name = synthesize(
            HttpMethod::Get,
            "/pets/{id}",
            TypeRole::Response,
            &business("v1", None),
        );
        assert_eq!(name, "GetPetsIdResType");
    }

    #[test]
    fn test_api_segment_dropped() {
        let name = synthesize(
            HttpMethod::Post,
            "/api/orders",
            TypeRole::Request,
            &business("v1", None),
        );
        assert_eq!(name, "PostOrdersReqType");
    }

    #[test]
    fn test_snake_case_segment() {
        let name = synthesize(
            HttpMethod::Delete,
            "/user_groups/{group_id}",
            TypeRole::Request,
            &business("v1", None),
        );
        assert_eq!(name, "DeleteUserGroupsGroupIdReqType");
    }

    #[test]
    fn test_camel_segment_keeps_inner_case() {
        let name = synthesize(
            HttpMethod::Get,
            "/orderItems",
            TypeRole::Response,
            &business("v1", None),
        );
        assert_eq!(name, "GetOrderItemsResType");
    }

    #[test]
    fn test_suffix_then_version() {
        let name = synthesize(
            HttpMethod::Get,
            "/orders",
            TypeRole::Response,
            &business("v2", Some("Shop")),
        );
        assert_eq!(name, "GetOrdersResTypeShopV2");
    }
}
