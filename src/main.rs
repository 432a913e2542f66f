//! Unitoolz 演示程序
//!
//! 依次演示工具库的各个部分：带保护的事件分发、模板替换、
//! 按名称查找组件、层级包围盒和二维角度计算。
//!
//! # 使用方法
//!
//! ```bash
//! # 使用配置文件（config.toml 不存在时使用默认配置）
//! cargo run
//!
//! # 命令行覆盖
//! cargo run -- --log-level debug --quiet-handlers
//! ```

use std::collections::HashMap;
use std::fmt::Display;

use anyhow::Context;
use tracing::{debug, info, warn};

use unitoolz::component::{GameObject, MeshRenderer, Space, Transform};
use unitoolz::core::{
    log, runtime, Config, Event, Event2, PropertyChanged, PropertyChangedEvent, SafeInvoke,
};
use unitoolz::math::{Vector2, Vector2Ext, Vector3};
use unitoolz::text::TemplateExt;
use unitoolz::toolz_info;

/// 应用程序入口点
///
/// # 初始化流程
///
/// 1. 加载配置文件（config.toml）
/// 2. 应用命令行参数覆盖
/// 3. 初始化日志系统
/// 4. 设置事件失败的报告方式
/// 5. 运行各个演示
fn main() -> anyhow::Result<()> {
    // 1. 加载配置（在初始化日志之前）
    let mut config = Config::from_file_or_default("config.toml");

    // 2. 应用命令行参数
    config.apply_args(std::env::args());
    config.validate().context("Invalid configuration")?;

    // 3. 初始化日志系统
    let log_file = if config.logging.file_output {
        Some(config.logging.log_file.as_str())
    } else {
        None
    };
    log::init_logger(config.logging.level, config.logging.file_output, log_file)?;

    // 4. 事件失败报告
    runtime::init_event_reporting(&config.events);

    info!(version = env!("CARGO_PKG_VERSION"), "Unitoolz demo starting");

    demo_events();
    demo_template();
    let rig = build_rig();
    demo_lookup(&rig)?;
    demo_bounds(&rig)?;
    demo_angles();

    info!("Unitoolz demo finished");
    Ok(())
}

fn demo_events() {
    let on_damage: Event2<&'static str, u32> = Event::new();

    on_damage.subscribe("Hud::on_damage", |(victim, amount)| {
        info!(victim = *victim, amount = *amount, "HUD updated");
    });
    on_damage.subscribe("Audio::play_hit", |_| panic!("audio device lost"));
    on_damage.subscribe("Stats::record_damage", |(_, amount)| {
        debug!(amount = *amount, "Damage recorded");
    });

    let report = on_damage.dispatch(&("player", 12));
    if !report.is_clean() {
        warn!(
            invoked = report.invoked,
            failed = ?report.failed_labels(),
            "Damage event finished with failing handlers"
        );
    }

    // 值返回型事件：只取第一个处理器的结果
    let query_name: Event<u32, String> = Event::new();
    query_name.subscribe("Registry::lookup", |id| format!("entity-{}", id));
    query_name.subscribe("Debug::echo", |id| id.to_string());
    info!(name = ?query_name.dispatch_first(&7), "Queried entity name");

    // 可能未创建的事件
    let missing: Option<PropertyChangedEvent> = None;
    let report = missing.safe_invoke(&PropertyChanged {
        sender: "Player".to_string(),
        property: "name".to_string(),
    });
    debug!(invoked = report.invoked, "Dispatched through an unset event");

    let on_changed = PropertyChangedEvent::new();
    on_changed.subscribe("Inspector::refresh", |change| {
        info!(sender = %change.sender, property = %change.property, "Property changed");
    });
    on_changed.notify("Player", "health");
}

fn demo_template() {
    let level = 3;
    let mut values: HashMap<&str, &dyn Display> = HashMap::new();
    values.insert("name", &"Ann");
    values.insert("level", &level);

    let line = "Welcome back {name}, you reached level {level}. {unknown} stays.".format_from_map(&values);
    info!(%line, "Formatted template");
}

/// Player
/// ├─ Body [MeshRenderer]
/// │  └─ Weapon [MeshRenderer]
/// └─ Shield [MeshRenderer]（未激活）
fn build_rig() -> GameObject {
    let mut shield = GameObject::with_transform("Shield", Transform::with_position(Vector3::new(-2.0, 1.0, 0.0)))
        .with_component(MeshRenderer::unit_cube());
    shield.active = false;

    let mut weapon = GameObject::with_transform("Weapon", Transform::with_position(Vector3::new(1.5, 0.5, 0.0)))
        .with_component(MeshRenderer::unit_cube());
    weapon.transform_mut().set_scale_xyz(0.2, 2.0, 0.2);

    let mut body = GameObject::with_transform("Body", Transform::with_position(Vector3::new(0.0, 1.0, 0.0)))
        .with_component(MeshRenderer::unit_cube());
    body.add_child(weapon);

    GameObject::with_transform("Player", Transform::with_position(Vector3::new(10.0, 0.0, 5.0)))
        .with_child(body)
        .with_child(shield)
}

fn demo_lookup(rig: &GameObject) -> anyhow::Result<()> {
    let weapon = rig.get_named_component_in_children::<MeshRenderer>("Weapon", false)?;
    info!(size = ?weapon.local_bounds.size(), "Found weapon renderer");

    let shield = rig.find_named_component_in_children::<MeshRenderer>("Shield", false);
    info!(found = shield.is_some(), "Shield lookup (active only)");

    let renderers = rig.get_components_in_children::<MeshRenderer>(true);
    toolz_info!(count = renderers.len(), "Renderers in hierarchy (including inactive)");
    Ok(())
}

fn demo_bounds(rig: &GameObject) -> anyhow::Result<()> {
    let bounds = rig.calculate_bounds_recursive()?;
    info!(center = ?bounds.center, size = ?bounds.size(), "Hierarchy bounds");

    let local_center = rig.calculate_average_bounds_center(Space::Local)?;
    info!(center = ?local_center, "Bounds center in player space");

    if let Err(e) = GameObject::new("Empty").calculate_bounds_recursive() {
        warn!("{}", e);
    }
    Ok(())
}

fn demo_angles() {
    let facing = Vector2::new(-1.0, 1.0);
    let target = Vector2::new(1.0, 0.0);

    let angle = facing.to_angle();
    let delta = facing.smallest_delta_angle(&target);
    let rebuilt = facing.from_angle(angle + delta);

    info!(angle, delta, rebuilt = ?rebuilt, "Angle math");
}
