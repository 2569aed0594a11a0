use std::fs;
use std::path::Path;

use game_content::entity::soldier::{self, ControlState};
use game_content::{
    AssetKind, ClassProperties, ContentFactory, ContentResolver, Grenade, Instance, Soldier,
    entity::grenade,
};

const CLASSES: &str = r#"[
    (
        name: "com_inf_default",
        properties: [
            ("HealthType", "person"),
            ("MaxHealth", "300"),
            ("ControlSpeed", "stand  1.00 1.00 1.00"),
            ("ControlSpeed", "crouch 0.70 0.70 0.70"),
        ],
    ),
    (
        name: "rep_inf_ep3_rifleman",
        parent: Some("com_inf_default"),
        properties: [
            ("MapTexture", "rep_icon"),
            ("ControlSpeed", "sprint 2.00 1.00 0.50"),
            ("WeaponSection", "1"),
            ("WeaponName", "rep_weap_inf_rifle"),
            ("WeaponAmmo", "4"),
            ("WeaponSection", "2"),
            ("WeaponName", "rep_weap_inf_thermaldetonator"),
            ("WeaponChannel", "1"),
        ],
    ),
    (name: "rep_weap_inf_rifle"),
    (name: "rep_weap_inf_thermaldetonator", properties: [("OffhandWeapon", "1")]),
]"#;

const INSTANCES: &str = r#"[
    (name: "trooper_1", class: "rep_inf_ep3_rifleman"),
    (
        name: "trooper_2",
        class: "rep_inf_ep3_rifleman",
        properties: [("CurHealth", "10"), ("MapTexture", "imp_icon")],
    ),
]"#;

const SCENE: &str = r#"(regions: ["cp1_capture"], paths: ["cp1_spawn"])"#;

fn write_data_dir(root: &Path) {
    fs::write(root.join("classes.ron"), CLASSES).unwrap();
    fs::write(root.join("instances.ron"), INSTANCES).unwrap();
    fs::write(root.join("scene.ron"), SCENE).unwrap();
    fs::create_dir(root.join("assets")).unwrap();
    fs::write(root.join("assets").join("rep_icon.tga"), b"").unwrap();
}

#[test]
fn binds_classes_and_spawns_instances_from_a_data_dir() {
    let dir = tempfile::tempdir().unwrap();
    write_data_dir(dir.path());

    let factory = ContentFactory::open(dir.path()).unwrap();
    let classes = factory.load_classes().unwrap();
    let instances = factory.load_instances().unwrap();
    let scene = factory.load_scene().unwrap();
    let assets = factory.asset_cache();
    let resolver = ContentResolver::new(&classes, &scene, &assets);

    let chain = classes.chain("rep_inf_ep3_rifleman").unwrap();
    let rifleman = ClassProperties::<Soldier>::bind(&chain, &resolver);

    assert!(rifleman.report().is_clean());
    assert_eq!(rifleman.get(soldier::MAX_HEALTH), 300.0);
    assert_eq!(
        rifleman.get(soldier::MAP_TEXTURE).map(|t| t.name().to_string()),
        Some("rep_icon".to_string())
    );
    assert_eq!(
        soldier::control_speed(rifleman.properties(), ControlState::Sprint).map(|s| s.turn),
        Some(0.5)
    );

    let loadout = soldier::weapon_loadout(rifleman.properties(), &classes);
    assert_eq!(loadout.primary()[0].class, "rep_weap_inf_rifle");
    assert_eq!(loadout.secondary()[0].class, "rep_weap_inf_thermaldetonator");

    let spawned: Vec<Instance<Soldier>> = instances
        .iter()
        .map(|def| Instance::spawn(&rifleman, def, &resolver))
        .collect();

    assert_eq!(spawned[0].get(soldier::CUR_HEALTH), 300.0);
    assert_eq!(spawned[1].get(soldier::CUR_HEALTH), 10.0);
    assert_eq!(spawned[1].get(soldier::MAP_TEXTURE), None);
    assert!(rifleman.get(soldier::MAP_TEXTURE).is_some());
    assert_eq!(assets.loaded(AssetKind::Texture), 1);

    let detonator = ClassProperties::<Grenade>::bind(
        &classes.chain("rep_weap_inf_thermaldetonator").unwrap(),
        &resolver,
    );
    assert!(detonator.get(grenade::OFFHAND_WEAPON));

    assets.clear();
    assert_eq!(assets.loaded(AssetKind::Texture), 0);
}
