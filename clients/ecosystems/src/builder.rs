use crate::EcosystemsClient;
use maintainers::api::Result;
use reqwest::header;
use reqwest::header::HeaderMap;
use reqwest::header::HeaderName;
use reqwest::header::HeaderValue;
use reqwest::ClientBuilder;
use secrecy::ExposeSecret;
use url::Url;

pub struct EcosystemsClientBuilder {
    client_builder: ClientBuilder,
    registry_url: String,
    activity_url: String,
    headers: HeaderMap,
}

impl Default for EcosystemsClientBuilder {
    fn default() -> Self {
        let builder = Self {
            client_builder: ClientBuilder::default(),
            registry_url: "https://packages.ecosyste.ms".to_string(),
            activity_url: "https://repos.ecosyste.ms".to_string(),
            headers: HeaderMap::default(),
        };
        builder
            .try_with_header(header::USER_AGENT, "curl")
            .unwrap() //TODO ugly
            .try_with_header(header::ACCEPT, "application/json")
            .unwrap() //TODO ugly
    }
}

impl EcosystemsClientBuilder {
    pub fn try_with_token(self, token: secrecy::SecretString) -> Result<EcosystemsClientBuilder> {
        Ok(self.try_with_header(header::AUTHORIZATION, token.expose_secret())?)
    }

    pub fn try_with_user_agent<STR: AsRef<str>>(self, user_agent: STR) -> Result<EcosystemsClientBuilder> {
        Ok(self.try_with_header(header::USER_AGENT, user_agent)?)
    }

    pub fn with_registry_url<STR: AsRef<str>>(mut self, url: STR) -> EcosystemsClientBuilder {
        self.registry_url = url.as_ref().to_string();
        self
    }

    pub fn with_activity_url<STR: AsRef<str>>(mut self, url: STR) -> EcosystemsClientBuilder {
        self.activity_url = url.as_ref().to_string();
        self
    }

    fn try_with_header(mut self, key: HeaderName, val: impl AsRef<str>) -> anyhow::Result<EcosystemsClientBuilder> {
        let val = HeaderValue::from_str(val.as_ref())?;
        self.headers.insert(key, val);
        Ok(self)
    }

    pub fn build(self) -> Result<EcosystemsClient> {
        let client = self.client_builder.default_headers(self.headers).build()?;
        let registry_url = base_url(self.registry_url)?;
        let activity_url = base_url(self.activity_url)?;
        Ok(EcosystemsClient {
            client,
            registry_url,
            activity_url,
        })
    }
}

fn base_url(url: String) -> Result<String> {
    let url = Url::parse(&url).map_err(anyhow::Error::from)?;
    Ok(url.as_str().trim_end_matches('/').to_string())
}
