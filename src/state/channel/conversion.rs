//! Static/dynamic conversion of custom channels.

use channeld_proto::{ChannelFlags, Notification};
use tracing::info;

use super::Channel;
use crate::state::policy::OwnershipPolicy;

impl Channel {
    /// Convert between dynamic and static. Returns whether anything
    /// changed.
    ///
    /// `explicit` is an administrative request; otherwise this is the
    /// automatic threshold check and only proceeds when the member count
    /// agrees with the requested direction.
    pub fn convert_static(&mut self, want_static: bool, explicit: bool) -> bool {
        if self.is_builtin() || !self.flags.contains(ChannelFlags::CUSTOM) || self.is_static == want_static {
            return false;
        }
        if want_static && self.password.is_some() {
            return false;
        }
        if !explicit && !self.policy.auto_static_allowed(want_static, self.members.len()) {
            return false;
        }

        if want_static {
            if self.owner.is_some() {
                let exclaim = explicit || self.members.len() > 1;
                self.set_owner(None, exclaim);
            }
            self.members.strip_moderators();

            if self.moderate {
                self.moderate = false;
                self.broadcast(Notification::moderation_off(&self.name, None));
            }
            if self.announce {
                self.announce = false;
                self.broadcast(Notification::announcements_off(&self.name, None));
            }
        } else if self.owner.is_none() {
            let next = OwnershipPolicy::select_successor(&self.members);
            self.set_owner(next, false);
        }

        self.is_static = want_static;
        crate::metrics::record_conversion(want_static);
        info!(
            channel = %self.name,
            members = self.members.len(),
            explicit,
            "channel is now {}",
            if want_static { "static" } else { "dynamic" }
        );
        true
    }
}
