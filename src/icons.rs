//! Interchangeable glyph themes.
//!
//! Every theme provides the same closed set of glyphs. The theme is picked
//! once from configuration and rendering code only ever asks the configured
//! [`IconSet`] for a [`Glyph`].

use serde::Serialize;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Glyph {
    Target,
    Lock,
    Unlock,
    Active,
    Check,
    Pending,
    LockedCrit,
    HdBadge,
    Clinician,
    Record,
}

impl Glyph {
    pub const ALL: [Glyph; 10] = [
        Glyph::Target,
        Glyph::Lock,
        Glyph::Unlock,
        Glyph::Active,
        Glyph::Check,
        Glyph::Pending,
        Glyph::LockedCrit,
        Glyph::HdBadge,
        Glyph::Clinician,
        Glyph::Record,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Glyph::Target => "target",
            Glyph::Lock => "lock",
            Glyph::Unlock => "unlock",
            Glyph::Active => "active",
            Glyph::Check => "check",
            Glyph::Pending => "pending",
            Glyph::LockedCrit => "locked_crit",
            Glyph::HdBadge => "hd_badge",
            Glyph::Clinician => "clinician",
            Glyph::Record => "record",
        }
    }
}

pub trait IconSet: Send + Sync {
    fn name(&self) -> &'static str;
    fn glyph(&self, glyph: Glyph) -> &'static str;
}

pub struct Surgical;
pub struct Geometric;
pub struct Kinetic;
pub struct Isometric;

impl IconSet for Surgical {
    fn name(&self) -> &'static str {
        "surgical"
    }

    fn glyph(&self, glyph: Glyph) -> &'static str {
        match glyph {
            Glyph::Target => r#"<svg viewBox="0 0 24 24" class="icon icon-lg" role="img" aria-label="Terminal Objective"><circle cx="12" cy="12" r="10" stroke-width="1.5"/><circle cx="12" cy="12" r="6" stroke-width="1" opacity="0.6"/><circle cx="12" cy="12" r="2" stroke-width="1" opacity="0.4"/><line x1="12" y1="1" x2="12" y2="4" stroke-width="1.5"/><line x1="12" y1="20" x2="12" y2="23" stroke-width="1.5"/><line x1="1" y1="12" x2="4" y2="12" stroke-width="1.5"/><line x1="20" y1="12" x2="23" y2="12" stroke-width="1.5"/></svg>"#,
            Glyph::Lock => r#"<svg viewBox="0 0 24 24" class="icon" role="img" aria-label="Locked Phase"><rect x="4" y="11" width="16" height="10" rx="1.5" stroke-width="1.5"/><path d="M8 11V7a4 4 0 0 1 8 0v4" stroke-width="1.5"/><line x1="8" y1="14" x2="10" y2="14" stroke-width="0.75" opacity="0.5"/><line x1="8" y1="16" x2="11" y2="16" stroke-width="0.75" opacity="0.5"/><circle cx="14" cy="16" r="1.5" stroke-width="1"/></svg>"#,
            Glyph::Unlock => r#"<svg viewBox="0 0 24 24" class="icon" role="img" aria-label="Unlocked Phase"><rect x="4" y="11" width="16" height="10" rx="1.5" stroke-width="1.5"/><path d="M8 11V7a4 4 0 0 1 7.874-.894" stroke-width="1.5"/><line x1="8" y1="14" x2="10" y2="14" stroke-width="0.75" opacity="0.5"/><circle cx="14" cy="16" r="1.5" stroke-width="1"/></svg>"#,
            Glyph::Active => r#"<svg viewBox="0 0 24 24" class="icon" role="img" aria-label="Active Phase"><line x1="1" y1="12" x2="5" y2="12" stroke-width="1.5"/><polyline points="5 12, 8 12, 9.5 5, 11 19, 12.5 8, 14 15, 15.5 12, 19 12" stroke-width="1.5"/><line x1="19" y1="12" x2="23" y2="12" stroke-width="1.5"/></svg>"#,
            Glyph::Check => r#"<svg viewBox="0 0 24 24" class="icon icon-sm met" role="img" aria-label="Criterion Met"><circle cx="12" cy="12" r="10" stroke-width="1.5"/><polyline points="8 12.5, 10.5 15, 16 9" stroke-width="1.5"/></svg>"#,
            Glyph::Pending => r#"<svg viewBox="0 0 24 24" class="icon icon-sm" role="img" aria-label="Criterion Pending"><circle cx="12" cy="12" r="10" stroke-width="1.5"/><line x1="12" y1="8" x2="12" y2="16" stroke-width="0.75" opacity="0.3"/><line x1="8" y1="12" x2="16" y2="12" stroke-width="0.75" opacity="0.3"/></svg>"#,
            Glyph::LockedCrit => r#"<svg viewBox="0 0 24 24" class="icon icon-sm locked" role="img" aria-label="Criterion Locked"><circle cx="12" cy="12" r="10" stroke-dasharray="3 3" stroke-width="1.5"/><line x1="9" y1="9" x2="15" y2="15" stroke-width="0.75" opacity="0.25"/><line x1="15" y1="9" x2="9" y2="15" stroke-width="0.75" opacity="0.25"/></svg>"#,
            Glyph::HdBadge => r#"<svg viewBox="0 0 24 24" class="icon icon-sm" role="img" aria-label="High Density"><polygon points="13 2, 3 14, 12 14, 11 22, 21 10, 12 10" stroke-width="1.5" fill="none"/></svg>"#,
            Glyph::Clinician => r#"<svg viewBox="0 0 24 24" class="icon" role="img" aria-label="Clinician"><path d="M4 15v-3a8 8 0 0 1 16 0v3" stroke-width="1.5"/><circle cx="4" cy="17" r="2" stroke-width="1.5"/><circle cx="20" cy="17" r="2" stroke-width="1.5"/><line x1="4" y1="19" x2="4" y2="21" stroke-width="1"/></svg>"#,
            Glyph::Record => r#"<svg viewBox="0 0 24 24" class="icon" role="img" aria-label="Record Metric"><path d="M17 3a2.83 2.83 0 1 1 4 4L7.5 20.5 2 22l1.5-5.5L17 3z" stroke-width="1.5"/><line x1="15" y1="5" x2="19" y2="9" stroke-width="1"/></svg>"#,
        }
    }
}

impl IconSet for Geometric {
    fn name(&self) -> &'static str {
        "geometric"
    }

    fn glyph(&self, glyph: Glyph) -> &'static str {
        match glyph {
            Glyph::Target => r#"<svg viewBox="0 0 24 24" class="icon icon-lg" role="img" aria-label="Terminal Objective"><rect x="4.34" y="4.34" width="15.32" height="15.32" rx="2" transform="rotate(45 12 12)" stroke-width="2.5"/><circle cx="12" cy="12" r="3" stroke-width="2.5"/><circle cx="12" cy="12" r="0.75" fill="currentColor" stroke="none"/></svg>"#,
            Glyph::Lock => r#"<svg viewBox="0 0 24 24" class="icon" role="img" aria-label="Locked Phase"><rect x="3" y="11" width="18" height="11" rx="2" stroke-width="2.5"/><path d="M7 11V7a5 5 0 0 1 10 0v4" stroke-width="2.5"/><circle cx="12" cy="16.5" r="2" fill="currentColor" stroke="none"/></svg>"#,
            Glyph::Unlock => r#"<svg viewBox="0 0 24 24" class="icon" role="img" aria-label="Unlocked Phase"><rect x="3" y="11" width="18" height="11" rx="2" stroke-width="2.5"/><path d="M7 11V7a5 5 0 0 1 9.9-1" stroke-width="2.5"/><circle cx="12" cy="16.5" r="2" fill="currentColor" stroke="none"/></svg>"#,
            Glyph::Active => r#"<svg viewBox="0 0 24 24" class="icon" role="img" aria-label="Active Phase"><polygon points="6,4 20,12 6,20" stroke-width="2.5" fill="none"/><line x1="10" y1="12" x2="16" y2="12" stroke-width="2.5"/></svg>"#,
            Glyph::Check => r#"<svg viewBox="0 0 24 24" class="icon icon-sm met" role="img" aria-label="Criterion Met"><polygon points="12,2 21.66,7 21.66,17 12,22 2.34,17 2.34,7" stroke-width="2"/><polyline points="7.5 12.5, 10.5 15.5, 16.5 9" stroke-width="2.5"/></svg>"#,
            Glyph::Pending => r#"<svg viewBox="0 0 24 24" class="icon icon-sm" role="img" aria-label="Criterion Pending"><circle cx="12" cy="12" r="10" stroke-width="2.5"/><line x1="8" y1="12" x2="16" y2="12" stroke-width="2.5"/></svg>"#,
            Glyph::LockedCrit => r#"<svg viewBox="0 0 24 24" class="icon icon-sm locked" role="img" aria-label="Criterion Locked"><rect x="3" y="3" width="18" height="18" rx="2" stroke-width="2.5"/><line x1="9" y1="9" x2="15" y2="15" stroke-width="2.5"/><line x1="15" y1="9" x2="9" y2="15" stroke-width="2.5"/></svg>"#,
            Glyph::HdBadge => r#"<svg viewBox="0 0 24 24" class="icon icon-sm" role="img" aria-label="High Density"><polygon points="7.86,2 16.14,2 22,7.86 22,16.14 16.14,22 7.86,22 2,16.14 2,7.86" stroke-width="2"/><line x1="12" y1="16" x2="12" y2="8" stroke-width="2.5"/><polyline points="8 12, 12 8, 16 12" stroke-width="2.5"/></svg>"#,
            Glyph::Clinician => r#"<svg viewBox="0 0 24 24" class="icon" role="img" aria-label="Clinician"><circle cx="12" cy="7" r="4" stroke-width="2.5"/><path d="M5.5 21a6.5 6.5 0 0 1 13 0" stroke-width="2.5"/><line x1="19" y1="11" x2="19" y2="17" stroke-width="2.5"/><line x1="16" y1="14" x2="22" y2="14" stroke-width="2.5"/></svg>"#,
            Glyph::Record => r#"<svg viewBox="0 0 24 24" class="icon" role="img" aria-label="Record Metric"><rect x="4" y="3" width="16" height="18" rx="2" stroke-width="2.5"/><line x1="8" y1="3" x2="8" y2="6" stroke-width="2.5"/><line x1="16" y1="3" x2="16" y2="6" stroke-width="2.5"/><polyline points="8.5 13.5, 11 16, 15.5 11" stroke-width="2.5"/></svg>"#,
        }
    }
}

impl IconSet for Kinetic {
    fn name(&self) -> &'static str {
        "kinetic"
    }

    fn glyph(&self, glyph: Glyph) -> &'static str {
        match glyph {
            Glyph::Target => r#"<svg viewBox="0 0 24 24" class="icon icon-lg kinetic" role="img" aria-label="Terminal Objective"><circle cx="12" cy="12" r="10" stroke-width="2"/><circle cx="12" cy="12" r="5.5" stroke-width="1.5"/><circle cx="12" cy="12" r="1" fill="currentColor" stroke="none"/><line x1="12" y1="1" x2="12" y2="5" stroke-width="2"/><line x1="12" y1="19" x2="12" y2="23" stroke-width="2"/><line x1="1" y1="12" x2="5" y2="12" stroke-width="2"/><line x1="19" y1="12" x2="23" y2="12" stroke-width="2"/></svg>"#,
            Glyph::Lock => r#"<svg viewBox="0 0 24 24" class="icon kinetic" role="img" aria-label="Locked Phase"><rect x="3" y="11" width="18" height="11" rx="2" ry="2" stroke-width="2"/><path d="M7 11V7a5 5 0 0 1 10 0v4" stroke-width="2"/><circle cx="12" cy="16" r="1.5" stroke-width="1.5"/><line x1="12" y1="17.5" x2="12" y2="19.5" stroke-width="1.5"/></svg>"#,
            Glyph::Unlock => r#"<svg viewBox="0 0 24 24" class="icon kinetic" role="img" aria-label="Unlocked Phase"><rect x="3" y="11" width="18" height="11" rx="2" ry="2" stroke-width="2"/><path d="M7 11V7a5 5 0 0 1 9.9-1" stroke-width="2"/><circle cx="12" cy="16" r="1.5" stroke-width="1.5"/><line x1="12" y1="17.5" x2="12" y2="19.5" stroke-width="1.5"/></svg>"#,
            Glyph::Active => r#"<svg viewBox="0 0 24 24" class="icon kinetic" role="img" aria-label="Active Phase"><polyline points="1 12, 5 12, 7.5 6, 10 18, 12.5 6, 15 18, 17.5 12, 23 12" stroke-width="2"/></svg>"#,
            Glyph::Check => r#"<svg viewBox="0 0 24 24" class="icon icon-sm met kinetic" role="img" aria-label="Criterion Met"><circle cx="12" cy="12" r="10" stroke-width="2"/><polyline points="7 12.5, 10.5 16, 17 9" stroke-width="2"/></svg>"#,
            Glyph::Pending => r#"<svg viewBox="0 0 24 24" class="icon icon-sm kinetic" role="img" aria-label="Criterion Pending"><circle cx="12" cy="12" r="10" stroke-width="2"/><polyline points="12 7, 12 12, 15.5 14" stroke-width="2"/></svg>"#,
            Glyph::LockedCrit => r#"<svg viewBox="0 0 24 24" class="icon icon-sm locked kinetic" role="img" aria-label="Criterion Locked"><circle cx="12" cy="12" r="10" stroke-dasharray="4 3" stroke-width="2"/><line x1="8" y1="12" x2="16" y2="12" stroke-width="2" opacity="0.4"/></svg>"#,
            Glyph::HdBadge => r#"<svg viewBox="0 0 24 24" class="icon icon-sm kinetic" role="img" aria-label="High Density"><polygon points="13 2, 3 14, 12 14, 11 22, 21 10, 12 10" stroke-width="2" fill="none"/></svg>"#,
            Glyph::Clinician => r#"<svg viewBox="0 0 24 24" class="icon kinetic" role="img" aria-label="Clinician"><path d="M12 22s8-4 8-10V5l-8-3-8 3v7c0 6 8 10 8 10z" stroke-width="2"/><line x1="12" y1="8" x2="12" y2="16" stroke-width="2"/><line x1="8" y1="12" x2="16" y2="12" stroke-width="2"/></svg>"#,
            Glyph::Record => r#"<svg viewBox="0 0 24 24" class="icon kinetic" role="img" aria-label="Record Metric"><path d="M12 20h9" stroke-width="2"/><path d="M16.5 3.5a2.12 2.12 0 0 1 3 3L7 19l-4 1 1-4L16.5 3.5z" stroke-width="2"/></svg>"#,
        }
    }
}

impl IconSet for Isometric {
    fn name(&self) -> &'static str {
        "isometric"
    }

    fn glyph(&self, glyph: Glyph) -> &'static str {
        match glyph {
            Glyph::Target => r#"<svg viewBox="0 0 24 24" class="icon icon-lg iso" role="img" aria-label="Terminal Objective"><ellipse cx="12" cy="14" rx="10" ry="5" stroke-width="1.5" class="iso-base"/><ellipse cx="12" cy="13" rx="10" ry="5" stroke-width="1.5" class="iso-top"/><ellipse cx="12" cy="13" rx="6" ry="3" stroke-width="1" class="iso-mid"/><ellipse cx="12" cy="13" rx="2" ry="1" stroke-width="1" class="iso-center"/></svg>"#,
            Glyph::Lock => r#"<svg viewBox="0 0 24 24" class="icon iso" role="img" aria-label="Locked Phase"><path d="M5 11 L5 20 L12 23 L19 20 L19 11 L12 14 Z" stroke-width="1.5" class="iso-base"/><path d="M5 11 L12 8 L19 11 L12 14 Z" stroke-width="1.5" class="iso-top"/><path d="M8 11 L8 7 C8 3.5 16 3.5 16 7 L16 11" stroke-width="1.5" fill="none"/><circle cx="12" cy="17" r="1" class="iso-dot"/></svg>"#,
            Glyph::Unlock => r#"<svg viewBox="0 0 24 24" class="icon iso" role="img" aria-label="Unlocked Phase"><path d="M5 11 L5 20 L12 23 L19 20 L19 11 L12 14 Z" stroke-width="1.5" class="iso-base"/><path d="M5 11 L12 8 L19 11 L12 14 Z" stroke-width="1.5" class="iso-top"/><path d="M8 11 L8 7 C8 3.5 14 3.5 14 5" stroke-width="1.5" fill="none"/><circle cx="12" cy="17" r="1" class="iso-dot"/></svg>"#,
            Glyph::Active => r#"<svg viewBox="0 0 24 24" class="icon iso" role="img" aria-label="Active Phase"><path d="M4 8 L12 4 L20 8 L20 16 L12 20 L4 16 Z" stroke-width="1.5" class="iso-base"/><path d="M4 8 L12 4 L20 8 L12 12 Z" stroke-width="1.5" class="iso-top"/><polyline points="9 10, 13 12, 9 14" stroke-width="2" fill="none" class="iso-arrow"/></svg>"#,
            Glyph::Check => r#"<svg viewBox="0 0 24 24" class="icon icon-sm met iso" role="img" aria-label="Criterion Met"><path d="M4 8 L12 4 L20 8 L20 16 L12 20 L4 16 Z" stroke-width="1.5" class="iso-base"/><path d="M4 8 L12 4 L20 8 L12 12 Z" stroke-width="1.5" class="iso-top"/><polyline points="8 8, 11 10, 16 6" stroke-width="2" fill="none"/></svg>"#,
            Glyph::Pending => r#"<svg viewBox="0 0 24 24" class="icon icon-sm iso" role="img" aria-label="Criterion Pending"><ellipse cx="12" cy="14" rx="9" ry="4.5" stroke-width="1.5" class="iso-base"/><ellipse cx="12" cy="12.5" rx="9" ry="4.5" stroke-width="1.5" class="iso-top"/></svg>"#,
            Glyph::LockedCrit => r#"<svg viewBox="0 0 24 24" class="icon icon-sm locked iso" role="img" aria-label="Criterion Locked"><ellipse cx="12" cy="12.5" rx="9" ry="4.5" stroke-width="1.5" stroke-dasharray="4 3" class="iso-top" opacity="0.5"/><line x1="9" y1="11" x2="15" y2="14" stroke-width="1.5" opacity="0.4"/><line x1="15" y1="11" x2="9" y2="14" stroke-width="1.5" opacity="0.4"/></svg>"#,
            Glyph::HdBadge => r#"<svg viewBox="0 0 24 24" class="icon icon-sm iso" role="img" aria-label="High Density"><path d="M4 8 L12 4 L20 8 L20 16 L12 20 L4 16 Z" stroke-width="1.5" class="iso-base"/><polygon points="13 6, 10 12, 13 12, 11 18, 17 11, 13 11" stroke-width="1" fill="none"/></svg>"#,
            Glyph::Clinician => r#"<svg viewBox="0 0 24 24" class="icon iso" role="img" aria-label="Clinician"><path d="M4 8 L12 4 L20 8 L20 16 L12 20 L4 16 Z" stroke-width="1.5" class="iso-base"/><line x1="12" y1="7" x2="12" y2="13" stroke-width="2.5"/><line x1="9" y1="10" x2="15" y2="10" stroke-width="2.5"/></svg>"#,
            Glyph::Record => r#"<svg viewBox="0 0 24 24" class="icon iso" role="img" aria-label="Record Metric"><path d="M5 5 L13 2 L19 5 L19 19 L13 22 L5 19 Z" stroke-width="1.5" class="iso-base"/><path d="M5 5 L13 2 L19 5 L13 8 Z" stroke-width="1.5" class="iso-top"/><line x1="8" y1="10" x2="13" y2="12" stroke-width="1" opacity="0.5"/><line x1="8" y1="13" x2="13" y2="15" stroke-width="1" opacity="0.5"/></svg>"#,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IconTheme {
    Surgical,
    Geometric,
    #[default]
    Kinetic,
    Isometric,
}

impl IconTheme {
    pub const ALL: [IconTheme; 4] = [
        IconTheme::Surgical,
        IconTheme::Geometric,
        IconTheme::Kinetic,
        IconTheme::Isometric,
    ];

    pub fn icon_set(self) -> &'static dyn IconSet {
        match self {
            IconTheme::Surgical => &Surgical,
            IconTheme::Geometric => &Geometric,
            IconTheme::Kinetic => &Kinetic,
            IconTheme::Isometric => &Isometric,
        }
    }
}

impl FromStr for IconTheme {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "surgical" => Ok(IconTheme::Surgical),
            "geometric" => Ok(IconTheme::Geometric),
            "kinetic" => Ok(IconTheme::Kinetic),
            "isometric" => Ok(IconTheme::Isometric),
            other => Err(format!("unknown icon theme '{other}'")),
        }
    }
}
