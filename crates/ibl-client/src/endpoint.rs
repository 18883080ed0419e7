//! Catalogue endpoint table.
//!
//! Each endpoint is a fixed (path template, response property, call style)
//! triple. [`crate::IblClient::fetch`] dispatches any of them.

/// Placeholder for the resource id in a path template.
pub const ID_PLACEHOLDER: &str = "{id}";

/// How an endpoint's response is shaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallStyle {
    /// `<path>/<id>` returns the raw record; `<path>` returns the unwrapped list.
    StaticList,
    /// Always unwrapped by property, or paginated when `autoPaginate` is set.
    Filtered,
}

/// A catalogue endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// `/episodes/{ids}`
    Episodes,
    /// `/groups/{id}/episodes`
    GroupEpisodes,
    /// `/episodes/{id}/recommendations`
    EpisodeRecommendations,
    /// `/programmes/{id}/episodes`
    ProgrammeEpisodes,
    /// `/programmes/{ids}`
    Programmes,
    /// `/categories/{id}/programmes`
    CategoryProgrammes,
    /// `/categories/{id}/highlights`
    CategoryHighlights,
    /// `/channels/{id}/highlights`
    ChannelHighlights,
    /// `/home/highlights`
    HomeHighlights,
    /// `/channels/{id}/broadcasts`
    ChannelBroadcasts,
    /// `/categories[/{id}]`
    Categories,
    /// `/channels[/{id}]`
    Channels,
}

impl Endpoint {
    /// Every endpoint.
    pub const ALL: [Self; 12] = [
        Self::Episodes,
        Self::GroupEpisodes,
        Self::EpisodeRecommendations,
        Self::ProgrammeEpisodes,
        Self::Programmes,
        Self::CategoryProgrammes,
        Self::CategoryHighlights,
        Self::ChannelHighlights,
        Self::HomeHighlights,
        Self::ChannelBroadcasts,
        Self::Categories,
        Self::Channels,
    ];

    /// Path template relative to the base URL.
    #[must_use]
    pub const fn template(self) -> &'static str {
        match self {
            Self::Episodes => "/episodes/{id}",
            Self::GroupEpisodes => "/groups/{id}/episodes",
            Self::EpisodeRecommendations => "/episodes/{id}/recommendations",
            Self::ProgrammeEpisodes => "/programmes/{id}/episodes",
            Self::Programmes => "/programmes/{id}",
            Self::CategoryProgrammes => "/categories/{id}/programmes",
            Self::CategoryHighlights => "/categories/{id}/highlights",
            Self::ChannelHighlights => "/channels/{id}/highlights",
            Self::HomeHighlights => "/home/highlights",
            Self::ChannelBroadcasts => "/channels/{id}/broadcasts",
            Self::Categories => "/categories",
            Self::Channels => "/channels",
        }
    }

    /// Top-level property of the response envelope holding the payload.
    #[must_use]
    pub const fn response_property(self) -> &'static str {
        match self {
            Self::Episodes => "episodes",
            Self::GroupEpisodes => "group_episodes",
            Self::EpisodeRecommendations => "episode_recommendations",
            Self::ProgrammeEpisodes => "programme_episodes",
            Self::Programmes => "programmes",
            Self::CategoryProgrammes => "category_programmes",
            Self::CategoryHighlights => "category_highlights",
            Self::ChannelHighlights => "channel_highlights",
            Self::HomeHighlights => "home_highlights",
            Self::ChannelBroadcasts => "broadcasts",
            Self::Categories => "categories",
            Self::Channels => "channels",
        }
    }

    /// Response shape of the endpoint.
    #[must_use]
    pub const fn call_style(self) -> CallStyle {
        match self {
            Self::Categories | Self::Channels => CallStyle::StaticList,
            _ => CallStyle::Filtered,
        }
    }

    /// Returns `true` if the template has an `{id}` segment.
    #[must_use]
    pub fn takes_id(self) -> bool {
        self.template().contains(ID_PLACEHOLDER)
    }

    /// Builds the request path.
    ///
    /// Static lists append `/<id>` when given one. Other endpoints substitute
    /// `id` into the template verbatim.
    #[must_use]
    pub fn path(self, id: Option<&str>) -> String {
        match (self.call_style(), id) {
            (CallStyle::StaticList, Some(id)) => format!("{}/{id}", self.template()),
            (CallStyle::StaticList, None) => String::from(self.template()),
            (CallStyle::Filtered, id) => self
                .template()
                .replace(ID_PLACEHOLDER, id.unwrap_or_default()),
        }
    }
}
