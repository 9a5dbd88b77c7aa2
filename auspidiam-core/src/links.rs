use std::fmt;
use std::ops::{Index, IndexMut};

/// Navigation labels orbiting the site title.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LinkId {
    About,
    Audits,
    Analysis,
}

impl LinkId {
    pub const COUNT: usize = 3;
    pub const ALL: [LinkId; Self::COUNT] = [LinkId::About, LinkId::Audits, LinkId::Analysis];

    pub const fn index(self) -> usize {
        match self {
            LinkId::About => 0,
            LinkId::Audits => 1,
            LinkId::Analysis => 2,
        }
    }

    /// Short key used for DOM ids (`link-<key>`) and logging.
    pub const fn key(self) -> &'static str {
        match self {
            LinkId::About => "about",
            LinkId::Audits => "audits",
            LinkId::Analysis => "analysis",
        }
    }

    pub fn descriptor(self) -> &'static NavLink {
        &NAV_LINKS[self.index()]
    }
}

impl fmt::Display for LinkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Site destinations. Only the path matters here; the pages themselves are
/// served elsewhere.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    About,
    Audits,
    Analysis,
    Audio,
}

impl Route {
    pub const fn path(self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::About => "/about",
            Route::Audits => "/audits",
            Route::Analysis => "/analysis",
            Route::Audio => "/audio",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavLink {
    pub id: LinkId,
    pub label: &'static str,
    pub target: Route,
}

pub const NAV_LINKS: [NavLink; LinkId::COUNT] = [
    NavLink {
        id: LinkId::About,
        label: "about.",
        target: Route::About,
    },
    NavLink {
        id: LinkId::Audits,
        label: "audits.",
        target: Route::Audits,
    },
    NavLink {
        id: LinkId::Analysis,
        label: "analysis.",
        target: Route::Analysis,
    },
];

/// Entry of the draggable nav panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PanelLink {
    pub label: &'static str,
    pub target: Route,
}

pub const PANEL_LINKS: [PanelLink; 4] = [
    PanelLink {
        label: "argument.",
        target: Route::Home,
    },
    PanelLink {
        label: "about.",
        target: Route::About,
    },
    PanelLink {
        label: "analysis.",
        target: Route::Analysis,
    },
    PanelLink {
        label: "audio.",
        target: Route::Audio,
    },
];

/// Total mapping from every [`LinkId`] to a value.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LinkMap<T>([T; LinkId::COUNT]);

impl<T> LinkMap<T> {
    pub fn from_fn(mut f: impl FnMut(LinkId) -> T) -> Self {
        LinkMap(LinkId::ALL.map(&mut f))
    }

    pub fn try_from_fn<E>(mut f: impl FnMut(LinkId) -> Result<T, E>) -> Result<Self, E> {
        let [a, b, c] = LinkId::ALL;
        Ok(LinkMap([f(a)?, f(b)?, f(c)?]))
    }

    pub fn iter(&self) -> impl Iterator<Item = (LinkId, &T)> {
        LinkId::ALL.into_iter().zip(self.0.iter())
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.0.iter()
    }

    pub fn map<U>(&self, mut f: impl FnMut(LinkId, &T) -> U) -> LinkMap<U> {
        LinkMap::from_fn(|id| f(id, &self.0[id.index()]))
    }
}

impl<T> Index<LinkId> for LinkMap<T> {
    type Output = T;

    fn index(&self, id: LinkId) -> &T {
        &self.0[id.index()]
    }
}

impl<T> IndexMut<LinkId> for LinkMap<T> {
    fn index_mut(&mut self, id: LinkId) -> &mut T {
        &mut self.0[id.index()]
    }
}
