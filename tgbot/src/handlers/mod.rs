//! Application routers. Deliberately minimal: they exist to exercise the
//! gateway (routing order, FSM access, locale) rather than to be a
//! product. Registration order is match-evaluation order, with the echo
//! catch-all last.

pub mod admin;
pub mod echo;
pub mod menu;
pub mod user;

use dispatch::Router;
use tgbot_core::Config;

/// The ordered router list registered on the dispatcher.
pub fn routers_list(config: &Config) -> Vec<Router> {
    vec![
        admin::admin_router(config.admin_ids.clone()),
        user::user_router(),
        menu::menu_router(),
        echo::echo_router(),
    ]
}
