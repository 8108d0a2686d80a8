use std::time::Duration;

use keystrike_catalog::{Enhancement, Enhancements, KeyboardLayout, Loadout, WeaponCatalog};
use keystrike_core::{Battlefield, Command, Event, SlotKey};
use keystrike_world::{self as world, query, World};

#[test]
fn starter_loadout_equips_and_fires_in_the_world() {
    let battlefield = Battlefield::default();
    let catalog = WeaponCatalog::builtin();
    let layout = KeyboardLayout::qwerty(&battlefield);
    let mut enhancements = Enhancements::new();
    enhancements.set(
        SlotKey::new('Q'),
        Enhancement {
            cooldown: 0.5,
            ..Enhancement::NEUTRAL
        },
    );
    let loadout = Loadout::starter(&catalog);

    let mut world = World::new();
    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::ConfigureBattlefield {
            battlefield,
            rng_seed: 1,
        },
        &mut events,
    );
    for command in loadout.equip_commands(&catalog, &layout, &enhancements) {
        world::apply(&mut world, command, &mut events);
    }

    let equipped = events
        .iter()
        .filter(|event| matches!(event, Event::SlotEquipped { .. }))
        .count();
    assert_eq!(equipped, catalog.len());

    let cooldowns = query::cooldown_view(&world);
    let blaster = cooldowns.get(SlotKey::new('Q')).expect("Q is equipped");
    assert_eq!(blaster.origin, layout.origin(SlotKey::new('Q')).expect("Q is laid out"));
    assert!(blaster.ready);

    events.clear();
    world::apply(
        &mut world,
        Command::TriggerSlot {
            key: SlotKey::new('Q'),
        },
        &mut events,
    );
    world::apply(
        &mut world,
        Command::Tick {
            dt: Duration::from_millis(16),
        },
        &mut events,
    );

    assert!(events
        .iter()
        .any(|event| matches!(event, Event::ShotFired { key, .. } if *key == SlotKey::new('Q'))));
    let remaining = query::cooldown_view(&world)
        .get(SlotKey::new('Q'))
        .map(|slot| slot.remaining)
        .expect("Q is equipped");
    assert_eq!(remaining, Duration::from_millis(150 - 16));
}
