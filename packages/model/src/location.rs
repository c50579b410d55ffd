use crate::registry::ContainerKey;

/// One hop from an owner node into one of its containers
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Step {
    pub container: ContainerKey,
    pub index: usize,
}

/// Structural address of a node: the container hops from the document root
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Location {
    pub steps: Vec<Step>,
}

impl Location {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn is_root(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.steps.len()
    }

    pub fn child(&self, container: ContainerKey, index: usize) -> Location {
        let mut steps = self.steps.clone();
        steps.push(Step { container, index });
        Location { steps }
    }

    /// Owner location and the last hop, `None` at the root
    pub fn split_last(&self) -> Option<(Location, &Step)> {
        let (last, rest) = self.steps.split_last()?;
        Some((Location { steps: rest.to_vec() }, last))
    }

    /// Whether `self` is `ancestor` or lies inside it
    pub fn starts_with(&self, ancestor: &Location) -> bool {
        self.steps.starts_with(&ancestor.steps)
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.steps.is_empty() {
            return f.write_str("$");
        }
        for (i, step) in self.steps.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{}[{}]", step.container, step.index)?;
        }
        Ok(())
    }
}
