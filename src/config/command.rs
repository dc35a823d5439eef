use clap::Subcommand;

use crate::{gateway::RecordId, store::FontSize};

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Show the feed, newest first
    Feed {
        #[arg(short, long, default_value = "10")]
        limit: usize,
        #[arg(short, long, default_value = "0")]
        offset: usize,
        /// Pages to load, one after another
        #[arg(short, long, default_value = "1")]
        pages: usize,
        #[arg(short, long)]
        category: Option<String>,
        #[arg(short, long)]
        username: Option<String>,
    },
    /// Post a chirp
    Post {
        content: String,
        #[arg(long)]
        image: Option<String>,
        #[arg(long)]
        category: Option<String>,
    },
    /// Follow a user, or unfollow one you already follow
    Follow {
        username: String,
        #[arg(long)]
        display_name: Option<String>,
    },
    /// List the users you follow
    Following,
    /// Bookmark a chirp
    Save { chirp_id: RecordId },
    /// Remove a bookmark
    Unsave { id: RecordId },
    /// List your bookmarks
    Saved,
    /// Show or change settings
    Settings {
        #[arg(long)]
        language: Option<String>,
        #[arg(long)]
        font_size: Option<FontSize>,
        #[arg(long)]
        toggle_reduced_motion: bool,
        /// Also store the language in your profile
        #[arg(long)]
        sync: bool,
    },
    /// Show someone's profile
    Profile { username: String },
    /// Remember who is signed in
    Login {
        user_id: String,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
    },
    /// Forget the signed-in user
    Logout,
}
