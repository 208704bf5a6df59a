//! Turns timeslices into animation frames.

use log::info;

use umlapse_core::{
    animation::{Animation, RankHints},
    drawable::ElementKind,
    style::FrameStyle,
};

use crate::timeline::Timeslice;

/// Renders every timeslice into one animation and serializes its frames.
///
/// A frame boundary is inserted between consecutive timeslices, so the
/// result holds one frame per timeslice (and one empty frame when there are
/// no timeslices). `clean` is recorded on each boundary.
pub fn animate(timeslices: &[Timeslice], style: &FrameStyle, clean: bool) -> Vec<String> {
    info!(timeslices = timeslices.len(), clean; "Rendering animation frames");

    let mut animation = Animation::new(style.clone());
    let mut ranks = RankHints::default();

    for (index, timeslice) in timeslices.iter().enumerate() {
        if index > 0 {
            animation.next_step(clean);
        }
        for drawable in timeslice {
            match drawable.render(&mut animation) {
                (id, ElementKind::Actor) => ranks.add_actor(id),
                (id, ElementKind::UseCase) => ranks.add_use_case(id),
                _ => {}
            }
        }
    }

    animation.frames(&ranks)
}
