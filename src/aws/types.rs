use serde::Deserialize;
use std::collections::BTreeMap;

/// `aws sts get-caller-identity`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CallerIdentity {
    pub account: String,
    pub arn: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleInfo {
    pub arn: String,
    pub role_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerInfo {
    pub layer_arn: String,
    pub layer_version_arn: String,
}

/// A Lambda function wired behind an API Gateway resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LambdaInfo {
    /// Resource path part with `-` replaced by `_`.
    pub lambda_name: String,
    /// Resource path part as it appears in the API.
    pub resource_name: String,
    /// HTTP methods configured on the resource.
    pub methods: Vec<String>,
}

/// Result of looking an API up by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiPresence {
    pub api_id: Option<String>,
    pub deployment_id: Option<String>,
}

// --- Raw CLI responses ---

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct RoleList {
    #[serde(default)]
    pub roles: Vec<Role>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct Role {
    pub role_name: String,
    pub arn: String,
    pub role_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct LayerList {
    #[serde(default)]
    pub layers: Vec<Layer>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct Layer {
    pub layer_name: String,
    pub layer_arn: String,
    pub latest_matching_version: LayerVersion,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct LayerVersion {
    pub layer_version_arn: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct PublishedVersion {
    pub version: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct FunctionPolicy {
    pub policy: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Identified {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RestApiList {
    #[serde(default)]
    pub items: Vec<RestApi>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RestApi {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StageList {
    #[serde(default)]
    pub item: Vec<Stage>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Stage {
    pub stage_name: String,
    pub deployment_id: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ResourceList {
    #[serde(default)]
    pub items: Vec<Resource>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Resource {
    pub id: String,
    pub path_part: Option<String>,
    #[serde(default)]
    pub resource_methods: BTreeMap<String, serde_yaml::Value>,
}
