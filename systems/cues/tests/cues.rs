use std::{sync::Arc, time::Duration};

use keystrike_core::{
    Battlefield, BulletGeometry, BulletKinematics, Command, EnemyArchetype, EnemyColor,
    EnemyKindId, Point, Side, SlotKey, WeaponArchetype, WeaponId,
};
use keystrike_system_cues::{Cue, CueCategory, Cues};
use keystrike_world::{self as world, World};

fn seeker() -> Arc<WeaponArchetype> {
    Arc::new(WeaponArchetype {
        id: WeaponId::new("seeker"),
        name: "Seeker".to_owned(),
        damage: 5.0,
        cooldown_ms: 100,
        fire_delay_ms: 0,
        bullets_per_shot: 1,
        burst_count: 3,
        burst_interval_ms: 30,
        bullet: BulletGeometry {
            width: 4.0,
            height: 8.0,
            model: "missile".to_owned(),
        },
        kinematics: BulletKinematics {
            initial_speed: 600.0,
            acceleration: 0.0,
            min_speed: 0.0,
            max_speed: 0.0,
            speed_limit_enabled: false,
        },
        lifetime_ms: 0,
        fade_out: false,
        center_spread_angle: 0.0,
        bullet_spread_angle: 0.0,
        tracking_angular_speed: 180.0,
        explosion_radius: 0.0,
        penetration: 1,
        lock_on_range: 300.0,
        lock_on_target: true,
    })
}

fn shielded_drone() -> Arc<EnemyArchetype> {
    Arc::new(EnemyArchetype {
        id: EnemyKindId::new("warden"),
        name: "Warden".to_owned(),
        health: 100.0,
        shield: 50.0,
        shield_regen_delay_ms: 0,
        shield_regen_rate: 0.0,
        damage_block: 0.0,
        speed_min: 0.0,
        speed_max: 0.0,
        spawn_height_min: 0.0,
        spawn_height_max: 1.0,
        spawn_weight: 1.0,
        kill_heal: 0.0,
        escape_damage: 0.0,
        score: 0,
        credits: 0,
        width: 40.0,
        height: 20.0,
        color: EnemyColor::from_rgb(0, 0, 200),
    })
}

#[test]
fn burst_with_lock_emits_one_lock_cue_and_one_cue_per_shot() {
    let mut world = World::new();
    let dispatcher = Cues::new();
    let mut cues: Vec<Cue> = Vec::new();
    let mut commands = vec![
        Command::ConfigureBattlefield {
            battlefield: Battlefield::default(),
            rng_seed: 9,
        },
        Command::SpawnEnemy {
            archetype: shielded_drone(),
            side: Side::Left,
            y: 200.0,
            speed: 0.0,
        },
        Command::EquipSlot {
            key: SlotKey::new('S'),
            origin: Point::new(60.0, 600.0),
            weapon: seeker(),
        },
        Command::TriggerSlot {
            key: SlotKey::new('S'),
        },
    ];
    commands.extend((0..80).map(|_| Command::Tick {
        dt: Duration::from_millis(10),
    }));

    for command in commands {
        let mut events = Vec::new();
        world::apply(&mut world, command, &mut events);
        dispatcher.handle(&events, &mut |cue: Cue| cues.push(cue));
    }

    let count = |category: CueCategory| cues.iter().filter(|cue| cue.category == category).count();
    assert_eq!(count(CueCategory::LockAcquired), 1);
    assert_eq!(count(CueCategory::ShotFired), 3);
    assert_eq!(count(CueCategory::ShieldHit), 3);
    assert_eq!(count(CueCategory::Hit), 0);
    assert_eq!(count(CueCategory::Kill), 0);
}
