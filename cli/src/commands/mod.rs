mod helpers;
mod item;
mod list;
mod log;

pub(crate) use item::{cmd_delete, cmd_show, cmd_update};
pub(crate) use list::{cmd_clear, cmd_list, cmd_total};
pub(crate) use log::cmd_add;
