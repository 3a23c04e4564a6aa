// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Keeps the catalog registry in line with the metadata service.
//!
//! A reconciliation pass diffs the published contexts against the desired
//! catalog set. New and changed catalogs are constructed concurrently, each on
//! a blocking thread bounded by the construction timeout, and published only
//! once complete. A failed construction leaves the previous context in place.
//! Passes are serialized; triggers arriving during a pass coalesce into one
//! follow-up pass.

use std::{
	collections::{BTreeMap, HashSet},
	ops::Deref,
	sync::{
		Arc,
		atomic::{AtomicU64, Ordering},
	},
	time::Duration,
};

use crossbeam_skiplist::SkipMap;
use futures_util::future::join_all;
use metabridge_core::{CatalogDef, CatalogError, CatalogObjectKind, CatalogType, EntityKind, QualifiedName};
use metabridge_type::{Error, ErrorKind, Result, internal_error, return_internal_error};
use tokio::{
	select,
	sync::{Mutex, Notify},
	task::{JoinHandle, spawn_blocking},
	time::{MissedTickBehavior, interval, timeout},
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use crate::{
	adapter::LayoutPolicy, config::LifecycleConfig, context::CatalogConnector, provider::ProviderRegistry,
	registry::CatalogRegistry, service::MetadataService,
};

mod report;
mod state;

pub use report::ReconcileReport;
pub use state::CatalogState;

#[derive(Clone)]
pub struct LifecycleManager(Arc<LifecycleInner>);

pub struct LifecycleInner {
	config: LifecycleConfig,
	providers: ProviderRegistry,
	registry: CatalogRegistry,
	service: Option<Arc<dyn MetadataService>>,
	states: SkipMap<String, CatalogState>,
	generation: AtomicU64,
	pass: Mutex<()>,
	trigger: Notify,
	shutdown: CancellationToken,
	task: parking_lot::Mutex<Option<JoinHandle<()>>>,
}

impl Deref for LifecycleManager {
	type Target = LifecycleInner;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

/// Catalogs the service could not describe in this pass
#[derive(Default)]
struct Retained {
	keys: HashSet<String>,
	metalakes: HashSet<String>,
}

struct Build {
	key: String,
	catalog: CatalogDef,
	reload: bool,
}

impl LifecycleManager {
	/// A manager fed only through [`LifecycleManager::reconcile_with`]
	pub fn new(config: LifecycleConfig, providers: ProviderRegistry) -> Self {
		Self::build(config, providers, None)
	}

	pub fn with_service(
		config: LifecycleConfig,
		providers: ProviderRegistry,
		service: Arc<dyn MetadataService>,
	) -> Self {
		Self::build(config, providers, Some(service))
	}

	fn build(config: LifecycleConfig, providers: ProviderRegistry, service: Option<Arc<dyn MetadataService>>) -> Self {
		Self(Arc::new(LifecycleInner {
			config,
			providers,
			registry: CatalogRegistry::new(),
			service,
			states: SkipMap::new(),
			generation: AtomicU64::new(0),
			pass: Mutex::new(()),
			trigger: Notify::new(),
			shutdown: CancellationToken::new(),
			task: parking_lot::Mutex::new(None),
		}))
	}
}

impl LifecycleInner {
	pub fn config(&self) -> &LifecycleConfig {
		&self.config
	}

	pub fn registry(&self) -> &CatalogRegistry {
		&self.registry
	}

	pub fn registry_key(&self, catalog: &CatalogDef) -> String {
		self.config.naming.key_of(catalog)
	}

	pub fn state(&self, key: &str) -> CatalogState {
		self.states.get(key).map(|entry| *entry.value()).unwrap_or_default()
	}

	/// All known catalogs with their state, ordered by registry key
	pub fn states(&self) -> Vec<(String, CatalogState)> {
		self.states.iter().map(|entry| (entry.key().clone(), *entry.value())).collect()
	}

	/// The published context of the catalog `name` belongs to
	pub fn resolve(&self, name: &QualifiedName) -> Result<Arc<CatalogConnector>> {
		let Some(catalog) = name.catalog() else {
			return Err(CatalogError::InvalidName {
				name: name.to_string(),
				expected: EntityKind::Catalog,
				actual: name.kind(),
			}
			.into());
		};
		self.registry.resolve(&self.config.naming.key(name.metalake(), catalog))
	}

	/// Requests a reconciliation pass from the background task
	pub fn trigger(&self) {
		self.trigger.notify_one();
	}

	fn transition(&self, key: &str, state: CatalogState) {
		let previous = self.state(key);
		self.states.insert(key.to_string(), state);
		debug!(catalog = key, from = %previous, to = %state, "catalog state changed");
	}

	/// Reconciles against the catalog set of the metadata service
	#[instrument(name = "catalog::lifecycle::reconcile", level = "debug", skip_all)]
	pub async fn reconcile(&self) -> Result<ReconcileReport> {
		let Some(service) = self.service.clone() else {
			return Err(CatalogError::UnsupportedOperation {
				operation: "reconcile".to_string(),
				name: "lifecycle manager".to_string(),
				reason: "no metadata service is configured".to_string(),
			}
			.into());
		};

		let _pass = self.pass.lock().await;

		let metalakes = if self.config.metalakes.is_empty() {
			service.list_metalakes().await?.into_iter().map(|metalake| metalake.name).collect()
		} else {
			self.config.metalakes.clone()
		};

		let mut desired = Vec::new();
		let mut retained = Retained::default();
		let mut report = ReconcileReport::default();

		for metalake in metalakes {
			let names = match service.list_catalogs(&metalake).await {
				Ok(names) => names,
				Err(err) if err.kind() == ErrorKind::NotFound => {
					debug!(metalake = %metalake, "metalake not found, bridging no catalogs");
					continue;
				}
				Err(err) => {
					warn!(metalake = %metalake, error = %err, "failed to list catalogs, keeping registered catalogs");
					retained.metalakes.insert(metalake);
					continue;
				}
			};

			for name in names {
				match service.load_catalog(&name).await {
					Ok(catalog) => desired.push(catalog),
					Err(err) => {
						let key = self.config.naming.key(name.metalake(), name.name());
						warn!(catalog = %name, error = %err, "failed to load catalog, keeping registered context");
						retained.keys.insert(key.clone());
						report.failed.push((key, err));
					}
				}
			}
		}

		Ok(self.pass(desired, retained, report).await)
	}

	/// Reconciles against an explicit catalog set
	#[instrument(name = "catalog::lifecycle::reconcile_with", level = "debug", skip_all, fields(catalogs = catalogs.len()))]
	pub async fn reconcile_with(&self, catalogs: Vec<CatalogDef>) -> ReconcileReport {
		let _pass = self.pass.lock().await;
		self.pass(catalogs, Retained::default(), ReconcileReport::default()).await
	}

	async fn pass(&self, catalogs: Vec<CatalogDef>, retained: Retained, mut report: ReconcileReport) -> ReconcileReport {
		let mut desired: BTreeMap<String, CatalogDef> = BTreeMap::new();
		for catalog in catalogs {
			if catalog.catalog_type != CatalogType::Relational {
				debug!(catalog = %catalog.full_name(), catalog_type = %catalog.catalog_type, "ignoring non relational catalog");
				continue;
			}
			let key = self.registry_key(&catalog);
			if desired.contains_key(&key) {
				report.failed.push((
					key.clone(),
					CatalogError::AlreadyExists {
						kind: CatalogObjectKind::Catalog,
						name: key,
					}
					.into(),
				));
				continue;
			}
			desired.insert(key, catalog);
		}

		let mut builds = Vec::new();
		for (key, catalog) in &desired {
			match self.registry.get(key) {
				Some(current) if current.catalog().same_definition(catalog) => report.unchanged.push(key.clone()),
				current => {
					let reload = current.is_some();
					self.transition(
						key,
						if reload {
							CatalogState::Reloading
						} else {
							CatalogState::Loading
						},
					);
					builds.push(Build {
						key: key.clone(),
						catalog: catalog.clone(),
						reload,
					});
				}
			}
		}

		let constructions = builds.into_iter().map(|build| {
			let generation = self.generation.fetch_add(1, Ordering::Relaxed) + 1;
			let construction = construct(
				self.providers.clone(),
				build.catalog.clone(),
				generation,
				self.config.layout_policy,
				self.config.construction_timeout,
			);
			async move { (build, construction.await) }
		});

		for (build, result) in join_all(constructions).await {
			match result {
				Ok(context) => {
					let generation = context.generation();
					self.registry.insert(build.key.clone(), Arc::new(context));
					self.transition(&build.key, CatalogState::Active);
					if build.reload {
						info!(catalog = %build.key, generation, "reloaded catalog");
						report.reloaded.push(build.key);
					} else {
						info!(catalog = %build.key, generation, provider = %build.catalog.provider, "created catalog");
						report.created.push(build.key);
					}
				}
				Err(err) => {
					warn!(catalog = %build.key, error = %err, "failed to construct catalog connector");
					self.transition(
						&build.key,
						if build.reload {
							CatalogState::Active
						} else {
							CatalogState::Absent
						},
					);
					report.failed.push((build.key, err));
				}
			}
		}

		for key in self.registry.names() {
			if desired.contains_key(&key) || retained.keys.contains(&key) {
				continue;
			}
			if let Some(current) = self.registry.get(&key) {
				if retained.metalakes.contains(&current.catalog().metalake) {
					continue;
				}
			}
			if self.registry.remove(&key).is_some() {
				self.transition(&key, CatalogState::Dropped);
				info!(catalog = %key, "dropped catalog");
				report.dropped.push(key);
			}
		}

		report.sort();
		report
	}

	async fn run(&self) {
		let mut ticks = interval(self.config.reload_interval.max(Duration::from_millis(1)));
		ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);

		loop {
			select! {
				biased;

				_ = self.shutdown.cancelled() => {
					debug!("lifecycle manager shutdown signal received");
					break;
				}
				_ = ticks.tick() => {}
				_ = self.trigger.notified() => {}
			}

			match self.reconcile().await {
				Ok(report) if !report.is_noop() => info!(
					created = report.created.len(),
					reloaded = report.reloaded.len(),
					dropped = report.dropped.len(),
					failed = report.failed.len(),
					"reconciled catalogs"
				),
				Ok(_) => {}
				Err(err) => warn!(error = %err, "catalog reconciliation failed"),
			}
		}
	}

	/// Stops the background task and waits for the pass in flight
	pub async fn shutdown(&self) {
		self.shutdown.cancel();
		let task = self.task.lock().take();
		if let Some(task) = task {
			if let Err(err) = task.await {
				warn!(error = %err, "lifecycle manager task ended abnormally");
			}
		}
		info!("stopped catalog lifecycle manager");
	}
}

impl LifecycleManager {
	/// Spawns the background task reconciling on every reload interval and
	/// trigger
	pub fn start(&self) -> Result<()> {
		if self.service.is_none() {
			return_internal_error!("cannot start the lifecycle manager without a metadata service");
		}
		if self.shutdown.is_cancelled() {
			return_internal_error!("the lifecycle manager was shut down");
		}
		let runtime = tokio::runtime::Handle::try_current()
			.map_err(|err| internal_error!("the lifecycle manager needs a tokio runtime: {}", err))?;

		let mut task = self.task.lock();
		if task.is_some() {
			return Ok(());
		}
		let background = self.clone();
		*task = Some(runtime.spawn(async move { background.run().await }));
		info!(interval = ?self.config.reload_interval, "started catalog lifecycle manager");
		Ok(())
	}
}

async fn construct(
	providers: ProviderRegistry,
	catalog: CatalogDef,
	generation: u64,
	policy: LayoutPolicy,
	limit: Duration,
) -> Result<CatalogConnector> {
	let name = catalog.full_name();
	let provider = catalog.provider.clone();
	let construction = spawn_blocking(move || {
		providers.create(&catalog, generation).map(|context| context.with_layout_policy(policy))
	});

	match timeout(limit, construction).await {
		Ok(Ok(result)) => result,
		Ok(Err(err)) => Err(Error::from(CatalogError::ConstructionFailed {
			catalog: name,
			provider,
			reason: format!("construction task failed: {}", err),
			cause: None,
		})),
		Err(_) => Err(CatalogError::ConstructionTimeout {
			catalog: name,
			provider,
			timeout: limit,
		}
		.into()),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn memory(name: &str) -> CatalogDef {
		CatalogDef::new("lake", name, "memory")
	}

	fn manager() -> LifecycleManager {
		LifecycleManager::new(LifecycleConfig::default(), ProviderRegistry::with_defaults())
	}

	#[tokio::test]
	async fn test_create_keep_and_drop() {
		let manager = manager();

		let report = manager.reconcile_with(vec![memory("a")]).await;
		assert_eq!(report.created, vec!["lake.a"]);
		let a = manager.registry().resolve("lake.a").unwrap();

		let report = manager.reconcile_with(vec![memory("a"), memory("b")]).await;
		assert_eq!(report.created, vec!["lake.b"]);
		assert_eq!(report.unchanged, vec!["lake.a"]);
		assert!(Arc::ptr_eq(&a, &manager.registry().resolve("lake.a").unwrap()));

		let report = manager.reconcile_with(vec![]).await;
		assert_eq!(report.dropped, vec!["lake.a", "lake.b"]);
		assert_eq!(manager.state("lake.a"), CatalogState::Dropped);
		assert_eq!(manager.registry().resolve("lake.a").unwrap_err().kind(), ErrorKind::NotFound);
	}

	#[tokio::test]
	async fn test_changed_properties_reload() {
		let manager = manager();
		manager.reconcile_with(vec![memory("a")]).await;
		let old = manager.registry().resolve("lake.a").unwrap();

		let report = manager.reconcile_with(vec![memory("a").with_property("memory.max-tables", "3")]).await;
		assert_eq!(report.reloaded, vec!["lake.a"]);

		let new = manager.registry().resolve("lake.a").unwrap();
		assert!(new.generation() > old.generation());
		assert!(old.connector().begin().is_ok());
		assert_eq!(manager.state("lake.a"), CatalogState::Active);
	}

	#[tokio::test]
	async fn test_comment_change_is_not_a_reload() {
		let manager = manager();
		manager.reconcile_with(vec![memory("a")]).await;
		let report = manager.reconcile_with(vec![memory("a").with_comment("renamed team")]).await;
		assert_eq!(report.unchanged, vec!["lake.a"]);
	}

	#[tokio::test]
	async fn test_failed_construction_keeps_previous_context() {
		let manager = manager();
		manager.reconcile_with(vec![memory("a")]).await;
		let generation = manager.registry().resolve("lake.a").unwrap().generation();

		let report = manager.reconcile_with(vec![memory("a").with_property("memory.max-tables", "-1")]).await;
		assert_eq!(report.failed.len(), 1);
		assert_eq!(report.failed[0].1.code, "CA_007");
		assert_eq!(manager.registry().resolve("lake.a").unwrap().generation(), generation);
		assert_eq!(manager.state("lake.a"), CatalogState::Active);
		assert!(report.into_result().is_err());
	}

	#[tokio::test]
	async fn test_failed_first_construction_publishes_nothing() {
		let manager = manager();
		let report = manager.reconcile_with(vec![CatalogDef::new("lake", "x", "kafka")]).await;
		assert_eq!(report.failed[0].1.code, "CA_009");
		assert!(manager.registry().is_empty());
		assert_eq!(manager.state("lake.x"), CatalogState::Absent);
	}

	#[tokio::test]
	async fn test_non_relational_and_duplicate_catalogs() {
		let manager = manager();
		let report = manager
			.reconcile_with(vec![
				memory("a"),
				memory("a").with_property("memory.max-tables", "2"),
				memory("files").with_type(CatalogType::Fileset),
			])
			.await;
		assert_eq!(report.created, vec!["lake.a"]);
		assert_eq!(report.failed.len(), 1);
		assert_eq!(report.failed[0].1.kind(), ErrorKind::AlreadyExists);
		assert!(!manager.registry().contains("lake.files"));
	}

	#[tokio::test]
	async fn test_resolve_by_qualified_name() {
		let manager = manager();
		manager.reconcile_with(vec![memory("a")]).await;
		let context = manager.resolve(&QualifiedName::of_table("lake", "a", "s", "t")).unwrap();
		assert_eq!(context.catalog().name, "a");
		assert_eq!(manager.resolve(&QualifiedName::of_metalake("lake")).unwrap_err().code, "CA_004");
	}

	#[tokio::test]
	async fn test_reconcile_requires_service() {
		let manager = manager();
		assert_eq!(manager.reconcile().await.unwrap_err().kind(), ErrorKind::Unsupported);
		assert!(manager.start().is_err());
	}
}
