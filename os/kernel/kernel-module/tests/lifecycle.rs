use kernel_module::{AttributeView, Host, HostConfig, KernelModule, ModuleError};
use kernel_sync::Task;
use kernel_sysfs::{
    Attribute, FileMode, GuardedValue, Namespace, Show, ShowBuffer, SysfsError,
};
use std::fmt::Write;
use std::sync::atomic::{AtomicUsize, Ordering};

static EXITS: AtomicUsize = AtomicUsize::new(0);

struct Answer;

impl Show<GuardedValue<u32>> for Answer {
    fn show(&self, ctx: &GuardedValue<u32>, task: &Task, buf: &mut ShowBuffer) -> Result<(), SysfsError> {
        write!(buf, "{}", *ctx.lock(task)?)?;
        Ok(())
    }
}

struct Demo {
    ns: Namespace<GuardedValue<u32>>,
}

impl KernelModule for Demo {
    const NAME: &'static str = "demo";

    fn init(host: &Host) -> Result<Self, ModuleError> {
        let fs = host.require_sysfs(Self::NAME)?;
        let ns = Namespace::register(fs, "demo_device", GuardedValue::new(42))?
            .add_endpoint(Attribute::read_only("answer", FileMode::RO, 25, Answer)?)?;
        Ok(Self { ns })
    }

    fn attributes(&self) -> Option<&dyn AttributeView> {
        Some(&self.ns)
    }
}

struct Silent;

impl KernelModule for Silent {
    const NAME: &'static str = "silent";

    fn init(_host: &Host) -> Result<Self, ModuleError> {
        Ok(Self)
    }

    fn exit(self, _host: &Host) {
        EXITS.fetch_add(1, Ordering::SeqCst);
    }
}

#[test]
fn load_read_unload() {
    let host = Host::new(HostConfig::default()).unwrap();
    let handle = host.load::<Demo>().unwrap();
    assert_eq!(host.sysfs().list_dirs(), ["demo_device"]);
    assert_eq!(handle.read(&Task::new("cat"), "answer").unwrap(), b"42");
    assert_eq!(
        handle.write(&Task::new("echo"), "answer", b"1"),
        Err(SysfsError::PermissionDenied)
    );

    handle.unload();
    assert!(host.sysfs().list_dirs().is_empty());
}

#[test]
fn disabled_sysfs_fails_activation() {
    let host = Host::new(HostConfig {
        sysfs_enabled: false,
        ..HostConfig::default()
    })
    .unwrap();
    let err = host.load::<Demo>().unwrap_err();
    assert_eq!(err, ModuleError::Sysfs(SysfsError::Unsupported));
    assert!(host.sysfs().list_dirs().is_empty());
}

#[test]
fn second_instance_conflicts() {
    let host = Host::new(HostConfig::default()).unwrap();
    let first = host.load::<Demo>().unwrap();
    let err = host.load::<Demo>().unwrap_err();
    assert_eq!(err.errno(), -17);
    drop(first);
    assert!(host.load::<Demo>().is_ok());
}

#[test]
fn modules_without_attributes() {
    let host = Host::new(HostConfig::default()).unwrap();
    let handle = host.load::<Silent>().unwrap();
    assert_eq!(handle.name(), "silent");
    assert_eq!(handle.read(&Task::new("cat"), "x"), Err(SysfsError::NotFound));
    handle.unload();
    assert_eq!(EXITS.load(Ordering::SeqCst), 1);
}

#[test]
fn impossible_heap_is_reported() {
    let err = Host::new(HostConfig {
        heap_size: 0,
        ..HostConfig::default()
    })
    .unwrap_err();
    assert_eq!(err, ModuleError::HeapUnavailable(0));
}
