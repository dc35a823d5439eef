use chrono::Utc;
use log::info;

use chirper::{
    model::{relative_time, Chirp, SavedEntry, UserProfile},
    store::SettingsState,
};

pub fn display_chirps(chirps: &[Chirp]) {
    if !log::log_enabled!(log::Level::Info) {
        return;
    }
    let now = Utc::now();
    for chirp in chirps {
        let verified = if chirp.verified { " ✓" } else { "" };
        info!(
            "#{} {}{} @{} · {}",
            chirp.id,
            chirp.display_name,
            verified,
            chirp.username,
            relative_time(chirp.created_on, now)
        );
        for line in chirp.content.lines() {
            info!("  {}", line);
        }
        if let Some(image) = chirp.image() {
            info!("  [image] {}", image);
        }
        info!(
            "  ♥ {}  ⟳ {}  ✉ {}  #{}",
            chirp.likes, chirp.rechirps, chirp.replies, chirp.category
        );
        info!("");
    }
}

pub fn display_saved(entries: &[SavedEntry]) {
    if !log::log_enabled!(log::Level::Info) {
        return;
    }
    let id_width = entries
        .iter()
        .map(|entry| entry.id().to_string().len())
        .max()
        .unwrap_or(0)
        .max(5);

    info!("+-{:-<id_width$}-+------------ - -", " Saved ");
    for entry in entries {
        let mut excerpt: String = entry.chirp.content.chars().take(60).collect();
        if excerpt.len() < entry.chirp.content.len() {
            excerpt.push('…');
        }
        info!(
            "| {:id_width$} | @{}: {}",
            entry.id(),
            entry.chirp.username,
            excerpt.replace('\n', " ")
        );
    }
    info!("+-{}-+------------ - -", "-".repeat(id_width));
}

pub fn display_settings(settings: &SettingsState) {
    info!("Language:       {} ({})", settings.language, settings.locale());
    info!("Title:          {}", settings.page_title());
    info!("Font size:      {}", settings.font_size);
    info!("Reduced motion: {}", settings.reduced_motion);
}

pub fn display_profile(profile: &UserProfile) {
    let name = profile.display_name.as_deref().unwrap_or(&profile.username);
    info!("{} (@{}){}", name, profile.username, if profile.verified { " ✓" } else { "" });
    if let Some(bio) = profile.bio.as_deref().filter(|bio| !bio.is_empty()) {
        info!("{}", bio);
    }
    if let Some(location) = profile.location.as_deref().filter(|l| !l.is_empty()) {
        info!("Location: {}", location);
    }
    if let Some(website) = profile.website.as_deref().filter(|w| !w.is_empty()) {
        info!("Website:  {}", website);
    }
    if let Some(joined) = profile.join_date {
        info!("Joined:   {}", joined.format("%B %Y"));
    }
    info!("{} following · {} followers", profile.following, profile.followers);
}
