//! 事件系统模块
//!
//! 提供带保护的多播事件分发：一个 [`Event`] 保存按注册顺序排列的处理器，
//! 分发时依次调用每个处理器，某个处理器 panic 不会影响其余处理器，也不会传播给调用方。
//!
//! # 设计原则
//!
//! - **快照分发**：分发开始时复制一份处理器列表，之后的注册/注销只影响下一次分发
//! - **失败隔离**：每个处理器都在独立的 `catch_unwind` 边界内执行，失败被记录后继续
//! - **显式标签**：处理器在注册时附带标签，日志中用标签定位出错的处理器
//! - **泛型参数**：参数类型 `A` 可以是 `()`、单个值或元组，返回类型 `R` 默认为 `()`
//!
//! # 使用示例
//!
//! ```
//! use unitoolz::core::event::*;
//!
//! let on_damage: Event2<&'static str, u32> = Event::new();
//!
//! on_damage.subscribe("Hud::refresh", |(target, amount)| {
//!     println!("{} took {} damage", target, amount);
//! });
//! on_damage.subscribe("Audio::play_hit", |_| panic!("audio device lost"));
//!
//! // 第二个处理器 panic，但分发本身不会失败
//! let report = on_damage.dispatch(&("player", 12));
//! assert_eq!(report.invoked, 2);
//! assert_eq!(report.failures.len(), 1);
//! ```
//!
//! # 并发模型
//!
//! 处理器列表由 `parking_lot::Mutex` 保护，锁只在复制快照时短暂持有，
//! 处理器执行期间不持有锁。因此处理器可以在回调中注册或注销处理器，
//! 其他线程也可以在分发进行时注册新的处理器。处理器本身在调用线程上顺序执行。

use std::any::Any;
use std::cell::Cell;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Once};

use parking_lot::Mutex;

use crate::core::config::LogLevel;
use crate::core::log::EVENT_TARGET;
use crate::core::runtime::{self, EventReporting};

static NEXT_HANDLER_ID: AtomicU64 = AtomicU64::new(1);

/// 处理器订阅 ID
///
/// 由 [`Event::subscribe`] 返回，可传给 [`Event::unsubscribe`] 注销处理器。
/// 在整个进程内唯一。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandlerId(u64);

impl HandlerId {
    fn next() -> Self {
        Self(NEXT_HANDLER_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// 原始数值
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for HandlerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// 事件处理器 trait
///
/// 闭包 `Fn(&A) -> R` 自动实现此 trait。需要携带状态的处理器对象也可以直接实现它，
/// 然后通过 [`Event::subscribe_handler`] 注册。
///
/// # 示例
///
/// ```
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicU32, Ordering};
/// use unitoolz::core::event::{Event, EventHandler};
///
/// struct ScoreKeeper {
///     score: AtomicU32,
/// }
///
/// impl EventHandler<u32> for ScoreKeeper {
///     fn handle_event(&self, points: &u32) {
///         self.score.fetch_add(*points, Ordering::Relaxed);
///     }
/// }
///
/// let keeper = Arc::new(ScoreKeeper { score: AtomicU32::new(0) });
/// let on_score: Event<u32> = Event::new();
/// on_score.subscribe_handler("ScoreKeeper::add", keeper.clone());
///
/// on_score.dispatch(&10);
/// assert_eq!(keeper.score.load(Ordering::Relaxed), 10);
/// ```
pub trait EventHandler<A, R = ()>: Send + Sync {
    /// 处理一次分发
    fn handle_event(&self, args: &A) -> R;
}

impl<A, R, F> EventHandler<A, R> for F
where
    F: Fn(&A) -> R + Send + Sync,
{
    fn handle_event(&self, args: &A) -> R {
        self(args)
    }
}

/// 订阅表中的一项
struct Subscription<A, R> {
    id: HandlerId,
    label: Arc<str>,
    handler: Arc<dyn EventHandler<A, R>>,
}

// 手动实现，避免 derive 给 A、R 加上 Clone 约束
impl<A, R> Clone for Subscription<A, R> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            label: Arc::clone(&self.label),
            handler: Arc::clone(&self.handler),
        }
    }
}

thread_local! {
    /// 当前线程上正在执行的处理器嵌套层数
    static HANDLER_DEPTH: Cell<usize> = const { Cell::new(0) };
}

/// 处理器执行期间的标记，panic 展开时同样会退出
struct HandlerScope;

impl HandlerScope {
    fn enter() -> Self {
        HANDLER_DEPTH.with(|depth| depth.set(depth.get() + 1));
        HandlerScope
    }
}

impl Drop for HandlerScope {
    fn drop(&mut self) {
        HANDLER_DEPTH.with(|depth| depth.set(depth.get().saturating_sub(1)));
    }
}

/// 当前线程是否正在执行某个事件处理器
pub fn inside_handler() -> bool {
    HANDLER_DEPTH.with(|depth| depth.get() > 0)
}

/// 安装 panic hook
///
/// 处理器中的 panic 已经由分发器通过 `tracing` 报告，hook 不再把它们打印到 stderr；
/// 其他 panic 仍交给之前的 hook 处理。多次调用只安装一次。
/// [`init_event_reporting`](crate::core::runtime::init_event_reporting) 会调用此函数。
pub fn install_panic_hook() {
    static INSTALLED: Once = Once::new();

    INSTALLED.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if !inside_handler() {
                previous(info);
            }
        }));
    });
}

impl<A, R> Subscription<A, R> {
    /// 在 panic 边界内调用处理器
    fn invoke(&self, args: &A) -> Result<R, HandlerFailure> {
        let _scope = HandlerScope::enter();
        panic::catch_unwind(AssertUnwindSafe(|| self.handler.handle_event(args))).map_err(|payload| {
            let failure = HandlerFailure {
                id: self.id,
                label: Arc::clone(&self.label),
                message: panic_message(&*payload),
            };
            report_failure(&failure);
            failure
        })
    }
}

/// 一次被隔离的处理器失败
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerFailure {
    /// 出错处理器的订阅 ID
    pub id: HandlerId,
    /// 注册时提供的标签
    pub label: Arc<str>,
    /// panic 信息
    pub message: String,
}

impl fmt::Display for HandlerFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "event handler '{}' ({}) panicked: {}", self.label, self.id, self.message)
    }
}

/// 一次分发的结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchReport {
    /// 被调用的处理器数量（包括失败的）
    pub invoked: usize,
    /// 失败的处理器，按调用顺序排列
    pub failures: Vec<HandlerFailure>,
}

impl DispatchReport {
    /// 是否所有处理器都正常返回
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// 失败处理器的标签
    pub fn failed_labels(&self) -> Vec<&str> {
        self.failures.iter().map(|f| f.label.as_ref()).collect()
    }

    fn record<R>(&mut self, outcome: Result<R, HandlerFailure>) -> Option<R> {
        self.invoked += 1;
        match outcome {
            Ok(value) => Some(value),
            Err(failure) => {
                self.failures.push(failure);
                None
            }
        }
    }
}

/// 多播事件
///
/// 保存按注册顺序排列的处理器。`A` 是传给处理器的参数类型，`R` 是处理器的返回类型。
///
/// # 分发方式
///
/// - [`dispatch`](Event::dispatch)：调用所有处理器，忽略返回值
/// - [`dispatch_default`](Event::dispatch_default)：以 `A::default()` 作为参数分发
/// - [`dispatch_first`](Event::dispatch_first)：调用所有处理器，只返回第一个处理器的结果
///
/// 所有分发方式都不会 panic。
pub struct Event<A, R = ()> {
    handlers: Mutex<Vec<Subscription<A, R>>>,
}

/// 无参数事件
pub type Event0 = Event<()>;

/// 单参数事件
pub type Event1<T> = Event<T>;

/// 双参数事件，处理器接收 `&(T1, T2)`
pub type Event2<T1, T2> = Event<(T1, T2)>;

impl<A, R> Event<A, R> {
    /// 创建空事件
    pub fn new() -> Self {
        Self {
            handlers: Mutex::new(Vec::new()),
        }
    }

    /// 注册闭包处理器
    ///
    /// 处理器追加到列表末尾。`label` 用于在日志中标识处理器，
    /// 建议使用 `类型::方法` 形式，例如 `"Hud::on_health_changed"`。
    pub fn subscribe<F>(&self, label: impl Into<String>, handler: F) -> HandlerId
    where
        F: Fn(&A) -> R + Send + Sync + 'static,
    {
        self.subscribe_handler(label, Arc::new(handler))
    }

    /// 注册处理器对象
    pub fn subscribe_handler(
        &self,
        label: impl Into<String>,
        handler: Arc<dyn EventHandler<A, R>>,
    ) -> HandlerId {
        let id = HandlerId::next();
        let label: String = label.into();
        let label: Arc<str> = Arc::from(label);
        tracing::trace!(target: EVENT_TARGET, handler = %label, id = id.value(), "subscribed");

        self.handlers.lock().push(Subscription { id, label, handler });
        id
    }

    /// 注销处理器
    ///
    /// 返回是否找到并移除了该处理器。重复注销是安全的。
    /// 正在进行的分发不受影响。
    pub fn unsubscribe(&self, id: HandlerId) -> bool {
        // 被移除的处理器在锁释放后才析构，析构中可以再访问此事件
        let removed: Vec<Subscription<A, R>> = {
            let mut handlers = self.handlers.lock();
            let (removed, kept): (Vec<_>, Vec<_>) = handlers.drain(..).partition(|s| s.id == id);
            *handlers = kept;
            removed
        };
        !removed.is_empty()
    }

    /// 注销所有处理器
    pub fn clear(&self) {
        let removed = std::mem::take(&mut *self.handlers.lock());
        drop(removed);
    }

    /// 当前处理器数量
    pub fn len(&self) -> usize {
        self.handlers.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.lock().is_empty()
    }

    /// 按注册顺序返回所有处理器的标签
    pub fn labels(&self) -> Vec<String> {
        self.handlers.lock().iter().map(|s| s.label.to_string()).collect()
    }

    /// 复制当前处理器列表，锁在返回前释放
    fn snapshot(&self) -> Vec<Subscription<A, R>> {
        self.handlers.lock().clone()
    }

    /// 分发事件
    ///
    /// 按注册顺序调用快照中的每个处理器，处理器的返回值被丢弃。
    /// 处理器 panic 时记录失败并继续调用下一个处理器。
    pub fn dispatch(&self, args: &A) -> DispatchReport {
        let mut report = DispatchReport::default();

        for subscription in &self.snapshot() {
            report.record(subscription.invoke(args));
        }

        report
    }

    /// 以默认参数分发事件
    pub fn dispatch_default(&self) -> DispatchReport
    where
        A: Default,
    {
        self.dispatch(&A::default())
    }

    /// 分发事件并返回第一个处理器的结果
    ///
    /// 没有处理器时返回 `None`。有多个处理器时所有处理器都会被调用，
    /// 但只有第一个处理器的结果被返回。第一个处理器 panic 时同样返回 `None`。
    ///
    /// 需要区分这两种情况时使用 [`dispatch_first_with_report`](Event::dispatch_first_with_report)：
    /// 没有处理器时 `invoked` 为 0，第一个处理器失败时 `failures` 中第一项的 `id` 是它的 ID。
    pub fn dispatch_first(&self, args: &A) -> Option<R> {
        self.dispatch_first_with_report(args).0
    }

    /// 与 [`dispatch_first`](Event::dispatch_first) 相同，同时返回分发结果
    pub fn dispatch_first_with_report(&self, args: &A) -> (Option<R>, DispatchReport) {
        let snapshot = self.snapshot();
        let mut report = DispatchReport::default();

        let mut subscriptions = snapshot.iter();
        let Some(first) = subscriptions.next() else {
            tracing::trace!(target: EVENT_TARGET, "dispatch_first on an event without handlers");
            return (None, report);
        };

        let result = report.record(first.invoke(args));
        for subscription in subscriptions {
            report.record(subscription.invoke(args));
        }

        (result, report)
    }
}

impl<A, R> Default for Event<A, R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A, R> fmt::Debug for Event<A, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("handlers", &self.labels())
            .finish()
    }
}

/// 属性变更通知的参数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyChanged {
    /// 发出通知的对象
    pub sender: String,
    /// 变更的属性名
    pub property: String,
}

/// 属性变更事件
pub type PropertyChangedEvent = Event<PropertyChanged>;

impl Event<PropertyChanged> {
    /// 通知所有处理器某个属性发生了变化
    pub fn notify(&self, sender: impl Into<String>, property: impl Into<String>) -> DispatchReport {
        self.dispatch(&PropertyChanged {
            sender: sender.into(),
            property: property.into(),
        })
    }
}

/// 对可能未设置的事件进行安全分发
///
/// 为 [`Event`] 以及 `Option`、`&`、`Arc` 包装实现。`None` 上的分发是空操作。
///
/// ```
/// use std::sync::Arc;
/// use unitoolz::core::event::{Event, SafeInvoke};
///
/// let mut on_ready: Option<Arc<Event<u32>>> = None;
/// assert_eq!(on_ready.safe_invoke(&1).invoked, 0);
///
/// let event = Arc::new(Event::new());
/// event.subscribe("Loader::ready", |_: &u32| {});
/// on_ready = Some(event);
/// assert_eq!(on_ready.safe_invoke(&1).invoked, 1);
/// ```
pub trait SafeInvoke<A, R = ()> {
    /// 调用所有处理器
    fn safe_invoke(&self, args: &A) -> DispatchReport;

    /// 调用所有处理器，返回第一个处理器的结果
    fn safe_invoke_first(&self, args: &A) -> Option<R>;
}

impl<A, R> SafeInvoke<A, R> for Event<A, R> {
    fn safe_invoke(&self, args: &A) -> DispatchReport {
        self.dispatch(args)
    }

    fn safe_invoke_first(&self, args: &A) -> Option<R> {
        self.dispatch_first(args)
    }
}

impl<A, R, T> SafeInvoke<A, R> for Option<T>
where
    T: SafeInvoke<A, R>,
{
    fn safe_invoke(&self, args: &A) -> DispatchReport {
        match self {
            Some(event) => event.safe_invoke(args),
            None => DispatchReport::default(),
        }
    }

    fn safe_invoke_first(&self, args: &A) -> Option<R> {
        self.as_ref().and_then(|event| event.safe_invoke_first(args))
    }
}

impl<A, R, T> SafeInvoke<A, R> for Arc<T>
where
    T: SafeInvoke<A, R> + ?Sized,
{
    fn safe_invoke(&self, args: &A) -> DispatchReport {
        (**self).safe_invoke(args)
    }

    fn safe_invoke_first(&self, args: &A) -> Option<R> {
        (**self).safe_invoke_first(args)
    }
}

impl<A, R, T> SafeInvoke<A, R> for &T
where
    T: SafeInvoke<A, R> + ?Sized,
{
    fn safe_invoke(&self, args: &A) -> DispatchReport {
        (**self).safe_invoke(args)
    }

    fn safe_invoke_first(&self, args: &A) -> Option<R> {
        (**self).safe_invoke_first(args)
    }
}

/// 从 panic 负载中提取信息
fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

/// 按运行时设置记录处理器失败
fn report_failure(failure: &HandlerFailure) {
    emit_failure(failure, runtime::event_reporting());
}

fn emit_failure(failure: &HandlerFailure, reporting: EventReporting) {
    let Some(level) = reporting.failure_level() else {
        return;
    };

    let handler = failure.label.as_ref();
    let id = failure.id.value();
    let message = failure.message.as_str();

    match level {
        LogLevel::Error => tracing::error!(target: EVENT_TARGET, handler, id, panic = message, "event handler panicked during dispatch"),
        LogLevel::Warn => tracing::warn!(target: EVENT_TARGET, handler, id, panic = message, "event handler panicked during dispatch"),
        LogLevel::Info => tracing::info!(target: EVENT_TARGET, handler, id, panic = message, "event handler panicked during dispatch"),
        LogLevel::Debug => tracing::debug!(target: EVENT_TARGET, handler, id, panic = message, "event handler panicked during dispatch"),
        LogLevel::Trace => tracing::trace!(target: EVENT_TARGET, handler, id, panic = message, "event handler panicked during dispatch"),
    }
}
