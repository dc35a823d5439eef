mod display;

use std::error::Error;

use chirper::{
    config::{Command, Config},
    gateway::HttpGateway,
    model::{ChirpDraft, FollowTarget, PageParams, User},
    storage::SqliteStorage,
    Store,
};
use display::{display_chirps, display_profile, display_saved, display_settings};
use log::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = Config::parse();
    config.init_logger();

    let gateway = HttpGateway::new(&config);
    let storage = SqliteStorage::open(config.storage())?;
    let mut store = Store::open(gateway, storage);
    if let Some(user) = store.state().user.user() {
        info!("Signed in as @{}", user.handle());
    }

    match config.command {
        Command::Feed {
            limit,
            offset,
            pages,
            category,
            username,
        } => {
            let params = PageParams {
                limit,
                offset,
                category,
                username,
            };
            store.load_chirps(params).await?;
            for _ in 1..pages {
                if store.load_more_chirps().await? == 0 {
                    break;
                }
            }
            let chirps = store.state().chirps.chirps();
            info!("{} chirps", chirps.len());
            info!("");
            display_chirps(chirps);
        }
        Command::Post {
            content,
            image,
            category,
        } => {
            let mut draft = ChirpDraft::new(content);
            if draft.is_over_limit() {
                warn!("{} characters over the limit", -draft.remaining_chars());
            }
            if let Some(image) = image {
                draft = draft.image(image);
            }
            if let Some(category) = category {
                draft = draft.category(category);
            }
            let chirp = store.create_chirp(draft).await?;
            info!("Posted");
            display_chirps(std::slice::from_ref(chirp));
        }
        Command::Follow {
            username,
            display_name,
        } => {
            store.load_followed_users().await?;
            let target = FollowTarget {
                display_name,
                ..FollowTarget::new(username.clone())
            };
            if store.toggle_follow_remote(target).await? {
                info!("Following @{}", username);
            } else {
                info!("Unfollowed @{}", username);
            }
        }
        Command::Following => {
            let followed = store.load_followed_users().await?;
            info!("Following {} users", followed.len());
            for username in followed {
                info!(" + @{}", username);
            }
        }
        Command::Save { chirp_id } => {
            let entry = store.save_chirp(chirp_id).await?;
            info!("Saved chirp {} as bookmark {}", entry.chirp_id(), entry.id());
        }
        Command::Unsave { id } => {
            store.remove_saved_item(id).await?;
            info!("Removed bookmark {}", id);
        }
        Command::Saved => {
            let entries = store.load_saved_items().await?;
            info!("{} saved chirps", entries.len());
            display_saved(entries);
        }
        Command::Settings {
            language,
            font_size,
            toggle_reduced_motion,
            sync,
        } => {
            if let Some(language) = language {
                store.set_language(&language)?;
            }
            if let Some(font_size) = font_size {
                store.set_font_size(font_size)?;
            }
            if toggle_reduced_motion {
                store.toggle_reduced_motion()?;
            }
            if sync {
                match store.sync_language_preference().await {
                    Ok(Some(_)) => info!("Language saved to your profile"),
                    Ok(None) => warn!("No profile to save the language to"),
                    Err(e) => warn!("Language kept locally only: {}", e),
                }
            }
            display_settings(&store.state().settings);
        }
        Command::Profile { username } => match store.load_profile(&username).await? {
            Some(profile) => display_profile(profile),
            None => warn!("@{} has no profile", username),
        },
        Command::Login {
            user_id,
            email,
            first_name,
            last_name,
        } => {
            store.sign_in(User {
                user_id,
                first_name,
                last_name,
                email_address: email,
                ..Default::default()
            })?;
        }
        Command::Logout => {
            store.sign_out()?;
            info!("Signed out");
        }
    }

    Ok(())
}
