//! Handlebars views for the control panel.

use crate::error::PanelError;
use discord_client::ChannelSummary;
use handlebars::Handlebars;
use serde::Serialize;

const LAYOUT: &str = include_str!("../templates/layout.hbs");
const INDEX: &str = include_str!("../templates/index.hbs");
const ERROR: &str = include_str!("../templates/error.hbs");

#[derive(Serialize)]
struct IndexView<'a> {
    title: &'a str,
    token: &'a str,
    chans: Vec<ChannelView<'a>>,
}

#[derive(Serialize)]
struct ChannelView<'a> {
    id: &'a str,
    name: &'a str,
}

#[derive(Serialize)]
struct ErrorView<'a> {
    title: &'a str,
}

/// Compiled templates.
pub struct Views {
    registry: Handlebars<'static>,
}

impl Views {
    pub fn new() -> Result<Self, PanelError> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        registry.register_partial("layout", LAYOUT)?;
        registry.register_template_string("index", INDEX)?;
        registry.register_template_string("error", ERROR)?;
        Ok(Self { registry })
    }

    /// Channel picker with the token embedded for the follow-up POST.
    pub fn index(&self, token: &str, channels: &[ChannelSummary]) -> Result<String, PanelError> {
        let view = IndexView {
            title: "SECRET INTERFACE",
            token,
            chans: channels
                .iter()
                .map(|c| ChannelView {
                    id: &c.id,
                    name: &c.name,
                })
                .collect(),
        };
        Ok(self.registry.render("index", &view)?)
    }

    pub fn error(&self) -> Result<String, PanelError> {
        Ok(self.registry.render("error", &ErrorView { title: "ERROR" })?)
    }
}
