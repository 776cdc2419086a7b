//! Unit tests for rr-signal.
//!
//! The controller is driven through small in-memory fakes of the capability
//! traits, so no grid is needed.

#[cfg(test)]
mod helpers {
    use rustc_hash::{FxHashMap, FxHashSet};

    use rr_core::{Position, Rail, SignalId};

    use crate::{RailSource, Signal, SignalSource};

    pub fn p(x: i32, y: i32) -> Position {
        Position::new(x, y)
    }

    /// Rails and signals kept in plain maps.
    #[derive(Default)]
    pub struct FakeTrack {
        pub adjacency: FxHashMap<Position, Vec<Rail>>,
        pub signals:   Vec<Signal>,
    }

    impl FakeTrack {
        pub fn line(cells: &[Position]) -> Self {
            let mut track = Self::default();
            for rail in Rail::path(cells) {
                track.add_rail(rail);
            }
            track
        }

        pub fn add_rail(&mut self, rail: Rail) {
            let (a, b) = rail.endpoints();
            self.adjacency.entry(a).or_default().push(rail);
            self.adjacency.entry(b).or_default().push(rail);
        }

        pub fn add_signal(&mut self, from: Position, to: Position) -> SignalId {
            let id = SignalId(self.signals.len() as u32);
            self.signals.push(Signal { id, from_position: from, rail: Rail::new(from, to) });
            id
        }

        pub fn endpoints(&self) -> FxHashSet<Position> {
            self.adjacency.keys().copied().collect()
        }
    }

    impl RailSource for FakeTrack {
        fn rail_positions(&self) -> Vec<Position> {
            self.adjacency.keys().copied().collect()
        }

        fn rails_at(&self, pos: Position) -> &[Rail] {
            self.adjacency.get(&pos).map(Vec::as_slice).unwrap_or(&[])
        }
    }

    impl SignalSource for FakeTrack {
        fn signals_on(&self, rail: &Rail) -> Vec<Signal> {
            self.signals.iter().filter(|s| s.rail == *rail).copied().collect()
        }
    }
}

// ── Block partition ───────────────────────────────────────────────────────────

#[cfg(test)]
mod partition {
    use rustc_hash::FxHashSet;

    use rr_core::{Position, Rail};

    use super::helpers::{p, FakeTrack};
    use crate::SignalController;

    /// Union of all block cells equals the rail endpoints, and any cell in
    /// two blocks is an endpoint of a signalled rail.
    fn assert_partition_invariants(track: &FakeTrack, ctl: &SignalController) {
        let union: FxHashSet<Position> = ctl.blocks().iter().flat_map(|b| b.positions()).collect();
        assert_eq!(union, track.endpoints());

        let signalled_endpoints: FxHashSet<Position> = track
            .signals
            .iter()
            .flat_map(|s| {
                let (a, b) = s.rail.endpoints();
                [a, b]
            })
            .collect();

        let blocks = ctl.blocks();
        for (i, a) in blocks.iter().enumerate() {
            for b in &blocks[i + 1..] {
                for pos in a.positions().filter(|&pos| b.contains(pos)) {
                    assert!(
                        signalled_endpoints.contains(&pos),
                        "blocks overlap at {pos}, which is not on a signalled rail"
                    );
                }
            }
        }

        // Every cell is interior to exactly one block.
        for pos in track.endpoints() {
            let owners = blocks.iter().filter(|b| b.interior().contains(&pos)).count();
            assert_eq!(owners, 1, "{pos} is interior to {owners} blocks");
        }
    }

    #[test]
    fn empty_track_has_no_blocks() {
        let track = FakeTrack::default();
        let mut ctl = SignalController::new();
        assert!(ctl.create_signal_blocks(&track, &track).is_empty());
        assert!(ctl.blocks().is_empty());
    }

    #[test]
    fn unsignalled_line_is_one_block() {
        let track = FakeTrack::line(&[p(0, 0), p(1, 0), p(2, 0), p(3, 0)]);
        let mut ctl = SignalController::new();
        ctl.create_signal_blocks(&track, &track);
        assert_eq!(ctl.blocks().len(), 1);
        assert!(!ctl.blocks()[0].is_signalled());
        assert_partition_invariants(&track, &ctl);
    }

    #[test]
    fn disconnected_pieces_are_separate_blocks() {
        let mut track = FakeTrack::line(&[p(0, 0), p(1, 0)]);
        track.add_rail(Rail::new(p(5, 5), p(6, 5)));
        let mut ctl = SignalController::new();
        ctl.create_signal_blocks(&track, &track);
        assert_eq!(ctl.blocks().len(), 2);
        assert_partition_invariants(&track, &ctl);
    }

    #[test]
    fn signal_splits_line() {
        // A-B-C-D, signal at C on rail C-D.
        let (a, b, c, d) = (p(0, 0), p(1, 0), p(2, 0), p(3, 0));
        let mut track = FakeTrack::line(&[a, b, c, d]);
        let sig = track.add_signal(c, d);
        let mut ctl = SignalController::new();
        ctl.create_signal_blocks(&track, &track);

        assert_eq!(ctl.blocks().len(), 2);
        assert_partition_invariants(&track, &ctl);

        // The block behind the signal (seen from C) is the one around D.
        let guarded: Vec<_> = ctl.blocks().iter().filter(|b| b.is_signalled()).collect();
        assert_eq!(guarded.len(), 1);
        assert_eq!(guarded[0].signals(), &[sig]);
        assert!(guarded[0].interior().contains(&d));
        assert!(guarded[0].boundary().contains(&c));
    }

    #[test]
    fn signals_on_both_ends_guard_both_sides() {
        let (a, b, c, d) = (p(0, 0), p(1, 0), p(2, 0), p(3, 0));
        let mut track = FakeTrack::line(&[a, b, c, d]);
        let towards_d = track.add_signal(c, d);
        let towards_c = track.add_signal(d, c);
        let mut ctl = SignalController::new();
        ctl.create_signal_blocks(&track, &track);

        assert_partition_invariants(&track, &ctl);
        let left = ctl.blocks().iter().find(|blk| blk.interior().contains(&a)).unwrap();
        let right = ctl.blocks().iter().find(|blk| blk.interior().contains(&d)).unwrap();
        assert_eq!(left.signals(), &[towards_c]);
        assert_eq!(right.signals(), &[towards_d]);
    }

    #[test]
    fn junction_with_several_signals() {
        // A plus-shaped junction around (5,5) with a signal on every arm.
        let centre = p(5, 5);
        let mut track = FakeTrack::default();
        for arm in centre.orthogonal_neighbours() {
            track.add_rail(Rail::new(centre, arm));
            let beyond = arm.offset(arm.x - centre.x, arm.y - centre.y);
            track.add_rail(Rail::new(arm, beyond));
            track.add_signal(arm, centre);
        }
        let mut ctl = SignalController::new();
        ctl.create_signal_blocks(&track, &track);

        // One block for the centre plus one per arm.
        assert_eq!(ctl.blocks().len(), 5);
        assert_partition_invariants(&track, &ctl);
        let hub = ctl.blocks().iter().find(|b| b.interior().contains(&centre)).unwrap();
        assert_eq!(hub.signals().len(), 4);
    }
}

// ── Reservations and aspects ──────────────────────────────────────────────────

#[cfg(test)]
mod reservation {
    use rr_core::{SignalColor, TrainId};

    use super::helpers::{p, FakeTrack};
    use crate::SignalController;

    fn split_line() -> (FakeTrack, SignalController, rr_core::SignalId) {
        let mut track = FakeTrack::line(&[p(0, 0), p(1, 0), p(2, 0), p(3, 0)]);
        let sig = track.add_signal(p(2, 0), p(3, 0));
        let mut ctl = SignalController::new();
        ctl.create_signal_blocks(&track, &track);
        (track, ctl, sig)
    }

    #[test]
    fn reserve_turns_guarding_signal_red() {
        let (_track, mut ctl, sig) = split_line();
        assert_eq!(ctl.color(sig), Some(SignalColor::Green));

        let changes = ctl.reserve(TrainId(0), p(3, 0));
        assert_eq!(changes, vec![(sig, SignalColor::Red)]);
        assert_eq!(ctl.color(sig), Some(SignalColor::Red));
        assert_eq!(ctl.reserver(p(3, 0)), Some(TrainId(0)));
    }

    #[test]
    fn reserve_replaces_previous_claim() {
        let (_track, mut ctl, sig) = split_line();
        ctl.reserve(TrainId(0), p(3, 0));
        let changes = ctl.reserve(TrainId(0), p(0, 0));
        assert_eq!(changes, vec![(sig, SignalColor::Green)]);
        assert_eq!(ctl.claim(TrainId(0)), Some(p(0, 0)));
        let guarded = ctl.blocks().iter().find(|b| b.is_signalled()).unwrap();
        assert_eq!(guarded.reserved_by(), None);
    }

    #[test]
    fn unreserve_unknown_train_is_noop() {
        let (_track, mut ctl, sig) = split_line();
        ctl.reserve(TrainId(1), p(3, 0));
        assert!(ctl.unreserve(TrainId(9)).is_empty());
        assert_eq!(ctl.color(sig), Some(SignalColor::Red));
        assert_eq!(ctl.reserver(p(3, 0)), Some(TrainId(1)));
    }

    #[test]
    fn unreserve_frees_block() {
        let (_track, mut ctl, sig) = split_line();
        ctl.reserve(TrainId(1), p(3, 0));
        assert_eq!(ctl.unreserve(TrainId(1)), vec![(sig, SignalColor::Green)]);
        assert_eq!(ctl.reserver(p(3, 0)), None);
        assert!(ctl.unreserve(TrainId(1)).is_empty());
    }

    #[test]
    fn boundary_cell_reserves_neighbouring_block() {
        let (_track, mut ctl, sig) = split_line();
        // C is a boundary of the guarded block around D.
        ctl.reserve(TrainId(0), p(2, 0));
        assert_eq!(ctl.color(sig), Some(SignalColor::Red));
        assert!(ctl.is_reservable_by(p(3, 0), TrainId(0)));
        assert!(!ctl.is_reservable_by(p(3, 0), TrainId(1)));
    }

    #[test]
    fn unsignalled_block_gates_like_any_other() {
        let track = FakeTrack::line(&[p(0, 0), p(1, 0), p(2, 0)]);
        let mut ctl = SignalController::new();
        ctl.create_signal_blocks(&track, &track);
        assert!(ctl.reserve(TrainId(1), p(0, 0)).is_empty());
        assert_eq!(ctl.reserver(p(2, 0)), Some(TrainId(1)));
        assert!(!ctl.is_reservable_by(p(2, 0), TrainId(2)));
        assert!(ctl.is_reservable_by(p(2, 0), TrainId(1)));
    }

    #[test]
    fn block_behind_outward_signal_gates_followers() {
        // A-B-C-D with one signal at C facing D: A, B and C form one block
        // whose only signal points away from it.
        let (_track, mut ctl, sig) = split_line();
        ctl.reserve(TrainId(1), p(0, 0));
        assert_eq!(ctl.color(sig), Some(SignalColor::Green));
        assert_eq!(ctl.reserver(p(1, 0)), Some(TrainId(1)));
        assert_eq!(ctl.reserver(p(2, 0)), Some(TrainId(1)));
        assert!(!ctl.is_reservable_by(p(1, 0), TrainId(2)));
        assert!(!ctl.is_reservable_by(p(2, 0), TrainId(2)));

        ctl.unreserve(TrainId(1));
        assert!(ctl.is_reservable_by(p(1, 0), TrainId(2)));
    }

    #[test]
    fn earliest_claim_wins_a_shared_block() {
        let (_track, mut ctl, _sig) = split_line();
        ctl.reserve(TrainId(4), p(3, 0));
        ctl.reserve(TrainId(2), p(3, 0));
        assert_eq!(ctl.reserver(p(3, 0)), Some(TrainId(4)));
        ctl.unreserve(TrainId(4));
        assert_eq!(ctl.reserver(p(3, 0)), Some(TrainId(2)));
    }

    #[test]
    fn claims_survive_rebuild() {
        let (mut track, mut ctl, sig) = split_line();
        ctl.reserve(TrainId(0), p(3, 0));
        // Add a second signal and rebuild: the claim is re-applied.
        let other = track.add_signal(p(1, 0), p(0, 0));
        let changes = ctl.create_signal_blocks(&track, &track);
        assert!(changes.iter().all(|&(id, _)| id != sig));
        assert_eq!(ctl.color(sig), Some(SignalColor::Red));
        assert_eq!(ctl.color(other), Some(SignalColor::Green));
        assert_eq!(ctl.reserver(p(3, 0)), Some(TrainId(0)));
    }
}
