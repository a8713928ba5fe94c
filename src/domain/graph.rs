//! Step graph: named steps with dependency edges, checked for cycles.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use crate::domain::{AppError, Step};

/// Directed acyclic graph of build steps, keyed by step name.
#[derive(Debug, Clone, Default)]
pub struct StepGraph {
    steps: BTreeMap<String, Step>,
}

impl StepGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a step. Names are unique across the graph.
    pub fn add_step(&mut self, step: Step) -> Result<(), AppError> {
        if self.steps.contains_key(&step.name) {
            return Err(AppError::DuplicateStep(step.name));
        }
        self.steps.insert(step.name.clone(), step);
        Ok(())
    }

    /// Add the edge `step -> dependency`. Both steps must already exist.
    pub fn depend_on(&mut self, step: &str, dependency: &str) -> Result<(), AppError> {
        self.require(dependency)?;
        let available = self.available();
        let entry = self.steps.get_mut(step).ok_or_else(|| AppError::UnknownStep {
            name: step.to_string(),
            available,
        })?;
        entry.dependencies.insert(dependency.to_string());
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Step> {
        self.steps.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.steps.contains_key(name)
    }

    /// Look up a step, reporting the user-facing steps on failure.
    pub fn require(&self, name: &str) -> Result<&Step, AppError> {
        self.steps
            .get(name)
            .ok_or_else(|| AppError::UnknownStep { name: name.to_string(), available: self.available() })
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn steps(&self) -> impl Iterator<Item = &Step> {
        self.steps.values()
    }

    /// Steps exposed as command-line verbs, sorted by name.
    pub fn top_level(&self) -> Vec<&Step> {
        self.steps.values().filter(|step| step.top_level).collect()
    }

    /// Check that every edge points at a known step and that there is no cycle.
    pub fn validate(&self) -> Result<(), AppError> {
        for step in self.steps.values() {
            for dep in &step.dependencies {
                if !self.steps.contains_key(dep) {
                    return Err(AppError::UnknownStep {
                        name: format!("{} (required by '{}')", dep, step.name),
                        available: self.available(),
                    });
                }
            }
        }
        let all: BTreeSet<String> = self.steps.keys().cloned().collect();
        self.topological(&all).map(|_| ())
    }

    /// The step itself plus everything it transitively depends on.
    pub fn closure(&self, name: &str) -> Result<BTreeSet<String>, AppError> {
        self.require(name)?;
        let mut seen = BTreeSet::new();
        let mut pending = vec![name.to_string()];
        while let Some(current) = pending.pop() {
            if !seen.insert(current.clone()) {
                continue;
            }
            let step = self.require(&current)?;
            pending.extend(step.dependencies.iter().cloned());
        }
        Ok(seen)
    }

    /// Deterministic dependency-first order of the closure of `name`.
    pub fn execution_order(&self, name: &str) -> Result<Vec<&Step>, AppError> {
        let closure = self.closure(name)?;
        let order = self.topological(&closure)?;
        Ok(order.iter().filter_map(|n| self.steps.get(n)).collect())
    }

    /// Kahn's algorithm restricted to `subset`; ties are broken by name.
    fn topological(&self, subset: &BTreeSet<String>) -> Result<Vec<String>, AppError> {
        // Edge A -> B means A depends on B (B must come before A)
        let mut in_degree: BTreeMap<&str, usize> = subset.iter().map(|k| (k.as_str(), 0)).collect();
        let mut dependents: BTreeMap<&str, Vec<&str>> =
            subset.iter().map(|k| (k.as_str(), Vec::new())).collect();

        for name in subset {
            let Some(step) = self.steps.get(name) else { continue };
            for dep in step.dependencies.iter().filter(|d| subset.contains(*d)) {
                if let Some(degree) = in_degree.get_mut(name.as_str()) {
                    *degree += 1;
                }
                if let Some(list) = dependents.get_mut(dep.as_str()) {
                    list.push(name.as_str());
                }
            }
        }

        let mut queue: VecDeque<&str> =
            in_degree.iter().filter(|&(_, deg)| *deg == 0).map(|(k, _)| *k).collect();
        let mut result = Vec::with_capacity(subset.len());

        while let Some(current) = queue.pop_front() {
            result.push(current.to_string());

            let mut next_batch = Vec::new();
            for dependent in dependents.get(current).into_iter().flatten() {
                if let Some(deg) = in_degree.get_mut(dependent) {
                    *deg -= 1;
                    if *deg == 0 {
                        next_batch.push(*dependent);
                    }
                }
            }

            next_batch.sort();
            queue.extend(next_batch);
        }

        if result.len() != subset.len() {
            let remaining: Vec<_> =
                in_degree.iter().filter(|&(_, deg)| *deg > 0).map(|(k, _)| *k).collect();
            return Err(AppError::CircularDependency(remaining.join(", ")));
        }

        Ok(result)
    }

    fn available(&self) -> String {
        self.top_level().iter().map(|s| s.name.as_str()).collect::<Vec<_>>().join(", ")
    }
}
