use kernel_sync::Task;
use kernel_sysfs::{
    Attribute, FileMode, GuardedValue, Namespace, PseudoFs, Show, ShowBuffer, SysfsError,
    SysfsRoot,
};
use std::fmt::Write;
use std::sync::{Arc, Mutex};

/// Records every filesystem call and fails the n-th file creation.
struct FlakyFs {
    inner: SysfsRoot,
    fail_on_file: usize,
    created: Mutex<usize>,
    ops: Mutex<Vec<String>>,
}

impl FlakyFs {
    fn new(fail_on_file: usize) -> Self {
        Self {
            inner: SysfsRoot::new(),
            fail_on_file,
            created: Mutex::new(0),
            ops: Mutex::new(Vec::new()),
        }
    }

    fn ops(&self) -> Vec<String> {
        self.ops.lock().unwrap().clone()
    }

    fn log(&self, op: String) {
        self.ops.lock().unwrap().push(op);
    }
}

impl PseudoFs for FlakyFs {
    fn create_dir(&self, dir: &str) -> Result<(), SysfsError> {
        self.log(format!("mkdir {dir}"));
        self.inner.create_dir(dir)
    }

    fn remove_dir(&self, dir: &str) {
        self.log(format!("rmdir {dir}"));
        self.inner.remove_dir(dir);
    }

    fn create_file(&self, dir: &str, name: &str, mode: FileMode) -> Result<(), SysfsError> {
        let mut created = self.created.lock().unwrap();
        *created += 1;
        if *created == self.fail_on_file {
            self.log(format!("create {name} failed"));
            return Err(SysfsError::ResourceUnavailable);
        }
        self.log(format!("create {name}"));
        self.inner.create_file(dir, name, mode)
    }

    fn remove_file(&self, dir: &str, name: &str) {
        self.log(format!("unlink {name}"));
        self.inner.remove_file(dir, name);
    }
}

struct Counter(GuardedValue<u32>);

struct Value;

impl Show<Counter> for Value {
    fn show(&self, ctx: &Counter, task: &Task, buf: &mut ShowBuffer) -> Result<(), SysfsError> {
        let v = ctx.0.lock(task)?;
        write!(buf, "{}", *v)?;
        Ok(())
    }
}

fn attr(name: &'static str) -> Attribute<Counter> {
    Attribute::read_only(name, FileMode::RO, 25, Value).unwrap()
}

fn build(fs: Arc<dyn PseudoFs>) -> Result<Namespace<Counter>, SysfsError> {
    Namespace::register(fs, "dev", Counter(GuardedValue::new(25)))?
        .add_endpoint(attr("one"))?
        .add_endpoint(attr("two"))?
        .add_endpoint(attr("three"))
}

#[test]
fn third_failure_unwinds_everything() {
    let fs = Arc::new(FlakyFs::new(3));
    assert_eq!(build(fs.clone()).unwrap_err(), SysfsError::ResourceUnavailable);

    assert!(fs.inner.list_dirs().is_empty());
    assert_eq!(
        fs.ops(),
        [
            "mkdir dev",
            "create one",
            "create two",
            "create three failed",
            "unlink two",
            "unlink one",
            "rmdir dev",
        ]
    );
}

#[test]
fn first_failure_releases_the_directory() {
    let fs = Arc::new(FlakyFs::new(1));
    assert!(build(fs.clone()).is_err());
    assert_eq!(fs.ops(), ["mkdir dev", "create one failed", "rmdir dev"]);
    assert!(!fs.inner.contains_dir("dev"));
}

#[test]
fn teardown_is_reverse_registration_order() {
    let fs = Arc::new(FlakyFs::new(usize::MAX));
    let ns = build(fs.clone()).unwrap();

    let names: Vec<_> = fs
        .inner
        .list("dev")
        .unwrap()
        .into_iter()
        .map(|e| e.name)
        .collect();
    assert_eq!(names, ["one", "two", "three"]);

    ns.teardown();
    assert_eq!(
        fs.ops()[4..],
        ["unlink three", "unlink two", "unlink one", "rmdir dev"]
    );
    assert!(fs.inner.list_dirs().is_empty());
}

#[test]
fn shows_are_stable_without_stores() {
    let fs = Arc::new(SysfsRoot::new());
    let ns = build(fs).unwrap();
    let task = Task::new("cat");
    let first = ns.show(&task, "two").unwrap();
    assert_eq!(first, b"25");
    for _ in 0..10 {
        assert_eq!(ns.show(&task, "two").unwrap(), first);
    }
}

#[test]
fn writing_a_read_only_endpoint_is_denied() {
    let fs = Arc::new(SysfsRoot::new());
    let ns = build(fs).unwrap();
    let task = Task::new("echo");
    assert_eq!(ns.store(&task, "one", b"1"), Err(SysfsError::PermissionDenied));
    assert_eq!(ns.show(&task, "one").unwrap(), b"25");
}
