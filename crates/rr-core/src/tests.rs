//! Unit tests for rr-core primitives.

#[cfg(test)]
mod ids {
    use crate::{SignalId, StationId, TrainId};

    #[test]
    fn next_is_sequential() {
        assert_eq!(TrainId(0).next(), TrainId(1));
        assert_eq!(StationId(41).next(), StationId(42));
    }

    #[test]
    fn invalid_sentinel() {
        assert_eq!(TrainId::INVALID.0, u32::MAX);
        assert!(!SignalId::default().is_valid());
        assert!(SignalId(3).is_valid());
    }

    #[test]
    fn display() {
        assert_eq!(TrainId(7).to_string(), "TrainId(7)");
    }
}

#[cfg(test)]
mod geometry {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    use crate::{Axis, CoreError, Position, Rail};

    fn p(x: i32, y: i32) -> Position {
        Position::new(x, y)
    }

    fn hash_of(rail: &Rail) -> u64 {
        let mut h = DefaultHasher::new();
        rail.hash(&mut h);
        h.finish()
    }

    #[test]
    fn rail_identity_ignores_endpoint_order() {
        let pairs = [
            (p(0, 0), p(1, 0)),
            (p(3, 4), p(2, 3)),
            (p(-1, 5), p(-1, 4)),
            (p(7, 7), p(8, 6)),
        ];
        for (a, b) in pairs {
            let fwd = Rail::new(a, b);
            let rev = Rail::new(b, a);
            assert_eq!(fwd, rev);
            assert_eq!(hash_of(&fwd), hash_of(&rev));
            assert_eq!(fwd.cmp(&rev), std::cmp::Ordering::Equal);
        }
    }

    #[test]
    fn legal_flag_not_part_of_identity() {
        let mut a = Rail::new(p(0, 0), p(0, 1));
        let b = Rail::new(p(0, 1), p(0, 0));
        a.set_legal(false);
        assert_eq!(a, b);
        assert!(!a.is_legal());
        assert!(b.is_legal());
    }

    #[test]
    fn other_end() {
        let r = Rail::new(p(2, 2), p(3, 3));
        assert_eq!(r.other_end(p(2, 2)), p(3, 3));
        assert_eq!(r.other_end(p(3, 3)), p(2, 2));
    }

    #[test]
    fn try_other_end_rejects_foreign_cell() {
        let r = Rail::new(p(2, 2), p(3, 3));
        assert_eq!(
            r.try_other_end(p(9, 9)),
            Err(CoreError::NotAnEndpoint { rail: r, position: p(9, 9) })
        );
    }

    #[test]
    #[should_panic(expected = "is not an endpoint")]
    fn other_end_panics_on_foreign_cell() {
        let r = Rail::new(p(0, 0), p(1, 0));
        let _ = r.other_end(p(5, 5));
    }

    #[test]
    fn axis_and_unit_length() {
        assert_eq!(Rail::new(p(0, 0), p(1, 0)).axis(), Some(Axis::EastWest));
        assert_eq!(Rail::new(p(0, 0), p(0, -1)).axis(), Some(Axis::NorthSouth));
        assert_eq!(Rail::new(p(0, 0), p(1, 1)).axis(), None);
        assert!(Rail::new(p(0, 0), p(1, 1)).is_unit_length());
        assert!(!Rail::new(p(0, 0), p(2, 0)).is_unit_length());
        assert!(!Rail::new(p(0, 0), p(0, 0)).is_unit_length());
    }

    #[test]
    fn path_builds_consecutive_rails() {
        let rails = Rail::path(&[p(0, 0), p(1, 0), p(2, 1)]);
        assert_eq!(rails, vec![Rail::new(p(0, 0), p(1, 0)), Rail::new(p(1, 0), p(2, 1))]);
        assert!(Rail::path(&[p(0, 0)]).is_empty());
    }

    #[test]
    fn adjacency() {
        assert!(p(0, 0).is_adjacent(p(1, 1)));
        assert!(!p(0, 0).is_orthogonally_adjacent(p(1, 1)));
        assert!(p(0, 0).is_orthogonally_adjacent(p(0, 1)));
        assert_eq!(p(0, 0).neighbours().count(), 8);
        assert!(p(0, 0).neighbours().all(|n| n.is_adjacent(p(0, 0))));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserialised_rail_is_normalised() {
        let json = r#"{"a":{"x":3,"y":0},"b":{"x":2,"y":0},"legal":false}"#;
        let rail: Rail = serde_json::from_str(json).unwrap();
        let expected = Rail::new(p(2, 0), p(3, 0));
        assert_eq!(rail.endpoints(), expected.endpoints());
        assert_eq!(hash_of(&rail), hash_of(&expected));
        assert!(!rail.is_legal());

        let back: Rail = serde_json::from_str(&serde_json::to_string(&rail).unwrap()).unwrap();
        assert_eq!(back, expected);
    }
}

#[cfg(test)]
mod cargo {
    use crate::{CargoHold, CargoKind};

    #[test]
    fn hold_tracks_kinds_separately() {
        let mut hold = CargoHold::new();
        hold.add(CargoKind::Iron, 2);
        hold.add(CargoKind::Coal, 1);
        assert_eq!(hold.amount(CargoKind::Iron), 2);
        assert_eq!(hold.amount(CargoKind::Coal), 1);
        assert_eq!(hold.total(), 3);
        assert_eq!(hold.unload_all(), 3);
        assert!(hold.is_empty());
    }
}

#[cfg(test)]
mod config {
    use crate::{GameConfig, GridBounds, Position};

    #[test]
    fn default_is_valid() {
        GameConfig::default().validate().unwrap();
    }

    #[test]
    fn rejects_non_increasing_thresholds() {
        let cfg = GameConfig { level_thresholds: vec![5, 5], ..GameConfig::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_zero_speed() {
        let mut cfg = GameConfig::default();
        cfg.train.speed = 0.0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn level_for_score() {
        let cfg = GameConfig { level_thresholds: vec![5, 15], ..GameConfig::default() };
        assert_eq!(cfg.level_for_score(0), 1);
        assert_eq!(cfg.level_for_score(4), 1);
        assert_eq!(cfg.level_for_score(5), 2);
        assert_eq!(cfg.level_for_score(100), 3);
    }

    #[test]
    fn bounds_expand_one_cell_per_side() {
        let b = GridBounds::new(Position::new(0, 0), Position::new(3, 2));
        let e = b.expanded();
        assert_eq!(e.min, Position::new(-1, -1));
        assert_eq!(e.max, Position::new(4, 3));
        assert_eq!(e.width(), b.width() + 2);
        assert_eq!(b.cells().count(), 12);
        assert!(e.contains(Position::new(-1, 3)));
        assert!(!b.contains(Position::new(-1, 3)));
    }
}

#[cfg(test)]
mod time {
    use crate::{SimClock, Tick};

    #[test]
    fn clock_accumulates() {
        let mut clock = SimClock::new();
        clock.advance(0.5);
        clock.advance(0.25);
        assert_eq!(clock.current_tick, Tick(2));
        assert!((clock.elapsed_secs - 0.75).abs() < 1e-9);
        assert_eq!(Tick(5).since(Tick(2)), 3);
        assert_eq!(Tick(2).since(Tick(5)), 0);
    }
}

#[cfg(test)]
mod rng {
    use crate::SimRng;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = SimRng::new(7);
        let mut b = SimRng::new(7);
        let cells: Vec<u32> = (0..100).collect();
        let xs: Vec<u32> = (0..8).map(|_| *a.choose(&cells).unwrap()).collect();
        let ys: Vec<u32> = (0..8).map(|_| *b.choose(&cells).unwrap()).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn choose_empty_is_none() {
        let mut r = SimRng::new(1);
        let empty: [u8; 0] = [];
        assert!(r.choose(&empty).is_none());
    }
}

#[cfg(test)]
mod event_bus {
    use crate::{Event, EventBus, EventKind, Position, Rail, TrainId};

    #[test]
    fn delivers_only_subscribed_kinds() {
        let mut bus = EventBus::new();
        let trains = bus.subscribe(&[EventKind::TrainCreated, EventKind::TrainDestroyed]);
        let all = bus.subscribe_all();

        let rail = Rail::new(Position::new(0, 0), Position::new(1, 0));
        bus.publish(Event::RailCreated(rail));
        bus.publish(Event::TrainCreated(TrainId(0)));
        assert_eq!(bus.pending_len(), 2);

        // Nothing is visible before delivery.
        assert!(bus.drain(trains).is_empty());
        assert_eq!(bus.deliver(), 2);

        assert_eq!(bus.drain(trains), vec![Event::TrainCreated(TrainId(0))]);
        assert_eq!(
            bus.drain(all),
            vec![Event::RailCreated(rail), Event::TrainCreated(TrainId(0))]
        );
        // Mailboxes are emptied by drain.
        assert!(bus.drain(all).is_empty());
    }

    #[test]
    fn unsubscribed_mailbox_stays_empty() {
        let mut bus = EventBus::new();
        let sub = bus.subscribe_all();
        bus.unsubscribe(sub);
        bus.unsubscribe(sub);
        bus.publish(Event::LevelUp { level: 2 });
        bus.deliver();
        assert!(bus.drain(sub).is_empty());
    }
}
