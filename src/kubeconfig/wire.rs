//! The `v1` on-disk shape of a kubeconfig document.
//!
//! # Design Decisions
//! - Keys are emitted in lexicographic order, matching what kubectl writes
//! - Named lists are converted to maps; a repeated name is an error
//! - Explicit `null` for a list, map or flag reads as its empty value
//! - `apiVersion: v1` and `kind: Config` are always written

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_yaml::Value;
use thiserror::Error;

use crate::kubeconfig::schema::{AuthInfo, Cluster, Config, Context, Extensions, Preferences};

/// Errors converting the wire shape into a [`Config`].
#[derive(Debug, Error)]
pub enum WireError {
    #[error("duplicate name {name:?} in {list} list")]
    DuplicateName { list: &'static str, name: String },
}

fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn is_false(flag: &bool) -> bool {
    !*flag
}

fn default_api_version() -> String {
    "v1".to_string()
}

fn default_kind() -> String {
    "Config".to_string()
}

fn into_map<T>(
    list: &'static str,
    entries: impl IntoIterator<Item = (String, T)>,
) -> Result<BTreeMap<String, T>, WireError> {
    let mut map = BTreeMap::new();
    for (name, entry) in entries {
        if map.insert(name.clone(), entry).is_some() {
            return Err(WireError::DuplicateName { list, name });
        }
    }
    Ok(map)
}

/// Root document as stored on disk.
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ConfigV1 {
    #[serde(rename = "apiVersion", default = "default_api_version")]
    pub api_version: String,

    #[serde(default, deserialize_with = "nullable")]
    pub clusters: Vec<NamedCluster>,

    #[serde(default, deserialize_with = "nullable")]
    pub contexts: Vec<NamedContext>,

    #[serde(default, deserialize_with = "nullable")]
    pub current_context: String,

    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Vec::is_empty")]
    pub extensions: Vec<NamedExtension>,

    #[serde(default = "default_kind")]
    pub kind: String,

    #[serde(default, deserialize_with = "nullable")]
    pub preferences: PreferencesV1,

    #[serde(default, deserialize_with = "nullable")]
    pub users: Vec<NamedAuthInfo>,
}

impl ConfigV1 {
    pub(crate) fn into_config(self) -> Result<Config, WireError> {
        let clusters = self
            .clusters
            .into_iter()
            .map(|named| Cluster::try_from(named.cluster).map(|cluster| (named.name, cluster)))
            .collect::<Result<Vec<_>, WireError>>()?;
        let auth_infos = self
            .users
            .into_iter()
            .map(|named| AuthInfo::try_from(named.user).map(|user| (named.name, user)))
            .collect::<Result<Vec<_>, WireError>>()?;
        let contexts = self
            .contexts
            .into_iter()
            .map(|named| Context::try_from(named.context).map(|context| (named.name, context)))
            .collect::<Result<Vec<_>, WireError>>()?;

        Ok(Config {
            preferences: Preferences::try_from(self.preferences)?,
            clusters: into_map("clusters", clusters)?,
            auth_infos: into_map("users", auth_infos)?,
            contexts: into_map("contexts", contexts)?,
            current_context: self.current_context,
            extensions: extensions_from_wire(self.extensions)?,
        })
    }
}

impl From<Config> for ConfigV1 {
    fn from(config: Config) -> Self {
        Self {
            api_version: default_api_version(),
            clusters: config
                .clusters
                .into_iter()
                .map(|(name, cluster)| NamedCluster { cluster: cluster.into(), name })
                .collect(),
            contexts: config
                .contexts
                .into_iter()
                .map(|(name, context)| NamedContext { context: context.into(), name })
                .collect(),
            current_context: config.current_context,
            extensions: extensions_to_wire(config.extensions),
            kind: default_kind(),
            preferences: config.preferences.into(),
            users: config
                .auth_infos
                .into_iter()
                .map(|(name, user)| NamedAuthInfo { name, user: user.into() })
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct NamedExtension {
    #[serde(default, deserialize_with = "nullable")]
    pub extension: Value,
    pub name: String,
}

fn extensions_from_wire(list: Vec<NamedExtension>) -> Result<Extensions, WireError> {
    into_map(
        "extensions",
        list.into_iter().map(|named| (named.name, named.extension)),
    )
}

fn extensions_to_wire(extensions: Extensions) -> Vec<NamedExtension> {
    extensions
        .into_iter()
        .map(|(name, extension)| NamedExtension { extension, name })
        .collect()
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct PreferencesV1 {
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "is_false")]
    pub colors: bool,

    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Vec::is_empty")]
    pub extensions: Vec<NamedExtension>,
}

impl TryFrom<PreferencesV1> for Preferences {
    type Error = WireError;

    fn try_from(wire: PreferencesV1) -> Result<Self, Self::Error> {
        Ok(Self {
            colors: wire.colors,
            extensions: extensions_from_wire(wire.extensions)?,
        })
    }
}

impl From<Preferences> for PreferencesV1 {
    fn from(preferences: Preferences) -> Self {
        Self {
            colors: preferences.colors,
            extensions: extensions_to_wire(preferences.extensions),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct NamedCluster {
    #[serde(default, deserialize_with = "nullable")]
    pub cluster: ClusterV1,
    pub name: String,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ClusterV1 {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certificate_authority: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certificate_authority_data: Option<String>,

    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "is_false")]
    pub disable_compression: bool,

    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Vec::is_empty")]
    pub extensions: Vec<NamedExtension>,

    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "is_false")]
    pub insecure_skip_tls_verify: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy_url: Option<String>,

    #[serde(default, deserialize_with = "nullable")]
    pub server: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls_server_name: Option<String>,
}

impl TryFrom<ClusterV1> for Cluster {
    type Error = WireError;

    fn try_from(wire: ClusterV1) -> Result<Self, Self::Error> {
        Ok(Self {
            server: wire.server,
            tls_server_name: wire.tls_server_name,
            insecure_skip_tls_verify: wire.insecure_skip_tls_verify,
            certificate_authority: wire.certificate_authority,
            certificate_authority_data: wire.certificate_authority_data,
            proxy_url: wire.proxy_url,
            disable_compression: wire.disable_compression,
            extensions: extensions_from_wire(wire.extensions)?,
        })
    }
}

impl From<Cluster> for ClusterV1 {
    fn from(cluster: Cluster) -> Self {
        Self {
            certificate_authority: cluster.certificate_authority,
            certificate_authority_data: cluster.certificate_authority_data,
            disable_compression: cluster.disable_compression,
            extensions: extensions_to_wire(cluster.extensions),
            insecure_skip_tls_verify: cluster.insecure_skip_tls_verify,
            proxy_url: cluster.proxy_url,
            server: cluster.server,
            tls_server_name: cluster.tls_server_name,
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct NamedAuthInfo {
    pub name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub user: AuthInfoV1,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct AuthInfoV1 {
    #[serde(rename = "as", default, skip_serializing_if = "Option::is_none")]
    pub impersonate: Option<String>,

    #[serde(
        rename = "as-groups",
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub impersonate_groups: Vec<String>,

    #[serde(rename = "as-uid", default, skip_serializing_if = "Option::is_none")]
    pub impersonate_uid: Option<String>,

    #[serde(
        rename = "as-user-extra",
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub impersonate_user_extra: BTreeMap<String, Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_provider: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_certificate: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_certificate_data: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_key_data: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exec: Option<Value>,

    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Vec::is_empty")]
    pub extensions: Vec<NamedExtension>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    #[serde(rename = "tokenFile", default, skip_serializing_if = "Option::is_none")]
    pub token_file: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

impl TryFrom<AuthInfoV1> for AuthInfo {
    type Error = WireError;

    fn try_from(wire: AuthInfoV1) -> Result<Self, Self::Error> {
        Ok(Self {
            client_certificate: wire.client_certificate,
            client_certificate_data: wire.client_certificate_data,
            client_key: wire.client_key,
            client_key_data: wire.client_key_data,
            token: wire.token,
            token_file: wire.token_file,
            impersonate: wire.impersonate,
            impersonate_uid: wire.impersonate_uid,
            impersonate_groups: wire.impersonate_groups,
            impersonate_user_extra: wire.impersonate_user_extra,
            username: wire.username,
            password: wire.password,
            auth_provider: wire.auth_provider,
            exec: wire.exec,
            extensions: extensions_from_wire(wire.extensions)?,
        })
    }
}

impl From<AuthInfo> for AuthInfoV1 {
    fn from(auth: AuthInfo) -> Self {
        Self {
            impersonate: auth.impersonate,
            impersonate_groups: auth.impersonate_groups,
            impersonate_uid: auth.impersonate_uid,
            impersonate_user_extra: auth.impersonate_user_extra,
            auth_provider: auth.auth_provider,
            client_certificate: auth.client_certificate,
            client_certificate_data: auth.client_certificate_data,
            client_key: auth.client_key,
            client_key_data: auth.client_key_data,
            exec: auth.exec,
            extensions: extensions_to_wire(auth.extensions),
            password: auth.password,
            token: auth.token,
            token_file: auth.token_file,
            username: auth.username,
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct NamedContext {
    #[serde(default, deserialize_with = "nullable")]
    pub context: ContextV1,
    pub name: String,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ContextV1 {
    #[serde(default, deserialize_with = "nullable")]
    pub cluster: String,

    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Vec::is_empty")]
    pub extensions: Vec<NamedExtension>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    #[serde(default, deserialize_with = "nullable")]
    pub user: String,
}

impl TryFrom<ContextV1> for Context {
    type Error = WireError;

    fn try_from(wire: ContextV1) -> Result<Self, Self::Error> {
        Ok(Self {
            cluster: wire.cluster,
            auth_info: wire.user,
            namespace: wire.namespace,
            extensions: extensions_from_wire(wire.extensions)?,
        })
    }
}

impl From<Context> for ContextV1 {
    fn from(context: Context) -> Self {
        Self {
            cluster: context.cluster,
            extensions: extensions_to_wire(context.extensions),
            namespace: context.namespace,
            user: context.auth_info,
        }
    }
}
