//! Derived URL report

use crate::error::Result;
use crate::output::{json_output, print_link};
use coffeeshop_env::{EnvironmentLoader, FrontendContext};
use serde::Serialize;
use std::io::Write;

/// URLs the frontend's collaborators derive from the environment
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct EndpointReport {
    pub api_base: String,
    pub auth_domain: String,
    pub issuer: String,
    pub jwks_url: String,
    pub algorithms: Vec<String>,
    pub authorize_url: String,
    pub logout_url: String,
}

impl EndpointReport {
    pub fn from_context(ctx: &FrontendContext, return_path: Option<&str>) -> Self {
        let auth = ctx.auth();
        Self {
            api_base: ctx.api().base().to_string(),
            auth_domain: auth.domain().to_string(),
            issuer: auth.issuer().to_string(),
            jwks_url: auth.jwks_url().to_string(),
            algorithms: auth.algorithms().iter().map(|a| a.to_string()).collect(),
            authorize_url: auth.authorize_url(return_path).to_string(),
            logout_url: auth.logout_url().to_string(),
        }
    }
}

/// Handle `endpoints`
pub fn handle_endpoints<W: Write>(
    out: &mut W,
    loader: &EnvironmentLoader,
    return_path: Option<&str>,
    json: bool,
) -> Result<()> {
    let ctx = FrontendContext::new(loader.load()?)?;
    let report = EndpointReport::from_context(&ctx, return_path);

    if json {
        return json_output(out, &report);
    }

    print_link(out, "API", &report.api_base)?;
    print_link(out, "Issuer", &report.issuer)?;
    print_link(out, "JWKS", &report.jwks_url)?;
    print_link(out, "Login", &report.authorize_url)?;
    print_link(out, "Logout", &report.logout_url)
}
