//! Generic per-kind analysis engine

use super::{
    CodeGenerator, FileWriter, ImplementationNamer, ItemRenderer, ItemSorter, ItemValidator,
    KeyNameProvider, NodeVisitor, NonEmptyKeyValidator, OutputFormatter, RenderedItem,
    ResultCollector, VecCollector,
};
use super::render::LevelListFormatter;
use crate::extractors::ShapeDependencyExtractor;
use crate::graph::{AlphabeticalResolver, DependencyResolver, TopologicalResolver};
use crate::models::{Declaration, Leveled, Shape};
use crate::{Error, Result, SortStrategy};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info};

/// First line of every generated document
pub const GENERATED_HEADER: &str = "// Code generated by declorder; DO NOT EDIT.";

/// Feeds syntax units through a node visitor and keeps the valid records
pub struct GenericVisitor<'a, N, T> {
    node_visitor: Box<dyn NodeVisitor<N, T> + 'a>,
    collector: Box<dyn ResultCollector<T> + 'a>,
    validator: Box<dyn ItemValidator<T> + 'a>,
}

impl<'a, N, T> GenericVisitor<'a, N, T> {
    pub fn new(
        node_visitor: impl NodeVisitor<N, T> + 'a,
        collector: impl ResultCollector<T> + 'a,
        validator: impl ItemValidator<T> + 'a,
    ) -> Self {
        Self {
            node_visitor: Box::new(node_visitor),
            collector: Box::new(collector),
            validator: Box::new(validator),
        }
    }

    /// Visit one unit; returns whether a record was collected
    pub fn visit(&mut self, node: &N) -> bool {
        match self.node_visitor.visit_node(node) {
            Some(item) if self.validator.is_valid(&item) => {
                self.collector.add_result(item);
                true
            }
            _ => false,
        }
    }

    pub fn results(&self) -> &[T] {
        self.collector.results()
    }
}

/// Sorter backed by a dependency resolver
pub struct DependencySorter<'a, T> {
    resolver: Box<dyn DependencyResolver<T> + 'a>,
}

impl<'a, T> DependencySorter<'a, T> {
    pub fn new(resolver: impl DependencyResolver<T> + 'a) -> Self {
        Self {
            resolver: Box::new(resolver),
        }
    }
}

impl<'a, S: Shape + 'a> DependencySorter<'a, Declaration<S>> {
    /// Sorter for declarations using the given strategy
    pub fn for_strategy(strategy: SortStrategy) -> Self {
        match strategy {
            SortStrategy::Topological => {
                Self::new(TopologicalResolver::new(ShapeDependencyExtractor, KeyNameProvider))
            }
            SortStrategy::Alphabetical => Self::new(AlphabeticalResolver::new(KeyNameProvider)),
        }
    }
}

impl<T> ItemSorter<T> for DependencySorter<'_, T> {
    fn sort_items(&self, items: Vec<T>) -> Vec<T> {
        self.resolver.resolve_dependencies(items)
    }
}

pub struct GenericFormatter<'a, T> {
    renderer: Box<dyn ItemRenderer<T> + 'a>,
    formatter: Box<dyn OutputFormatter + 'a>,
}

impl<'a, T> GenericFormatter<'a, T> {
    pub fn new(renderer: impl ItemRenderer<T> + 'a, formatter: impl OutputFormatter + 'a) -> Self {
        Self {
            renderer: Box::new(renderer),
            formatter: Box::new(formatter),
        }
    }

    pub fn format_item(&self, item: &T) -> String {
        self.renderer.render_item(item)
    }

    pub fn format_all(&self, items: &[RenderedItem]) -> String {
        self.formatter.format_output(items)
    }
}

/// Code generation strategies bundled with the writer that persists them
pub struct GenericCodeGenerator<'a, T> {
    generator: Box<dyn CodeGenerator<T> + 'a>,
    namer: Box<dyn ImplementationNamer<T> + 'a>,
    writer: Box<dyn FileWriter + 'a>,
}

impl<'a, T> GenericCodeGenerator<'a, T> {
    pub fn new(
        generator: impl CodeGenerator<T> + 'a,
        namer: impl ImplementationNamer<T> + 'a,
        writer: impl FileWriter + 'a,
    ) -> Self {
        Self {
            generator: Box::new(generator),
            namer: Box::new(namer),
            writer: Box::new(writer),
        }
    }

    pub fn generate_implementation(&self, item: &T) -> Option<String> {
        self.generator.generate_code(item)
    }

    pub fn implementation_name(&self, item: &T) -> String {
        self.namer.implementation_name(item)
    }

    pub fn write_to_file(&self, content: &str, path: &Path) -> Result<()> {
        self.writer.write_to_file(content, path)
    }
}

/// Generated source for one record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedStub {
    pub implementation_name: String,
    /// Level of the originating record, for documentation only
    pub level: usize,
    pub source: String,
}

/// Runs one declaration kind through collection, sorting, rendering and
/// generation
pub struct AnalysisEngine<'a, N, T> {
    visitor: GenericVisitor<'a, N, T>,
    sorter: Box<dyn ItemSorter<T> + 'a>,
    formatter: GenericFormatter<'a, T>,
    code_generator: Option<GenericCodeGenerator<'a, T>>,
}

impl<'a, N, T> AnalysisEngine<'a, N, T>
where
    T: Clone + Leveled,
{
    pub fn new(
        visitor: GenericVisitor<'a, N, T>,
        sorter: impl ItemSorter<T> + 'a,
        formatter: GenericFormatter<'a, T>,
        code_generator: Option<GenericCodeGenerator<'a, T>>,
    ) -> Self {
        Self {
            visitor,
            sorter: Box::new(sorter),
            formatter,
            code_generator,
        }
    }

    pub fn with_code_generator(mut self, code_generator: GenericCodeGenerator<'a, T>) -> Self {
        self.code_generator = Some(code_generator);
        self
    }

    pub fn has_code_generator(&self) -> bool {
        self.code_generator.is_some()
    }

    /// Feed one syntax unit
    pub fn analyze(&mut self, node: &N) -> bool {
        self.visitor.visit(node)
    }

    /// Feed every unit, returning how many records were collected
    pub fn analyze_all<'n, I>(&mut self, nodes: I) -> usize
    where
        I: IntoIterator<Item = &'n N>,
        N: 'n,
    {
        nodes.into_iter().filter(|node| self.visitor.visit(node)).count()
    }

    /// Collected records in unsorted arrival order
    pub fn results(&self) -> &[T] {
        self.visitor.results()
    }

    /// Collected records, sorted with levels assigned
    pub fn sorted_results(&self) -> Vec<T> {
        self.sorter.sort_items(self.visitor.results().to_vec())
    }

    /// Report section for this kind, without heading
    pub fn render_results(&self) -> String {
        let rendered: Vec<RenderedItem> = self
            .sorted_results()
            .iter()
            .map(|item| RenderedItem {
                text: self.formatter.format_item(item),
                attachment: self
                    .code_generator
                    .as_ref()
                    .and_then(|generator| generator.generate_implementation(item)),
            })
            .collect();
        self.formatter.format_all(&rendered)
    }

    /// Generated stubs keyed by implementation name
    pub fn generate_stubs(&self) -> BTreeMap<String, GeneratedStub> {
        let Some(generator) = &self.code_generator else {
            return BTreeMap::new();
        };

        self.sorted_results()
            .iter()
            .filter_map(|item| {
                let source = generator.generate_implementation(item)?;
                let implementation_name = generator.implementation_name(item);
                Some((
                    implementation_name.clone(),
                    GeneratedStub {
                        implementation_name,
                        level: item.level(),
                        source,
                    },
                ))
            })
            .collect()
    }

    /// Single document holding every generated implementation in sorted order
    pub fn generate_document(&self, package: &str) -> Result<String> {
        let generator = self.code_generator.as_ref().ok_or(Error::GeneratorUnavailable)?;

        let mut document = format!("{GENERATED_HEADER}\n\npackage {package}\n\n");
        for item in &self.sorted_results() {
            if let Some(code) = generator.generate_implementation(item) {
                document.push_str(&code);
                document.push('\n');
            }
        }
        Ok(document)
    }

    /// Generate the document and persist it at `path`
    pub fn generate_code_file(&self, package: &str, path: &Path) -> Result<()> {
        let document = self.generate_document(package)?;
        let generator = self.code_generator.as_ref().ok_or(Error::GeneratorUnavailable)?;

        generator.write_to_file(&document, path)?;
        info!(path = %path.display(), bytes = document.len(), "wrote generated implementations");
        Ok(())
    }
}

/// Engine for one declaration kind with the shared collector, validator and
/// sorter; the visitor and renderer are the kind-specific parts
pub fn declaration_engine<'a, N, S>(
    visitor: impl NodeVisitor<N, Declaration<S>> + 'a,
    renderer: impl ItemRenderer<Declaration<S>> + 'a,
    strategy: SortStrategy,
) -> AnalysisEngine<'a, N, Declaration<S>>
where
    S: Shape + Clone + 'a,
    N: 'a,
{
    debug!(kind = %S::KIND, %strategy, "creating analysis engine");
    AnalysisEngine::new(
        GenericVisitor::new(visitor, VecCollector::default(), NonEmptyKeyValidator),
        DependencySorter::for_strategy(strategy),
        GenericFormatter::new(renderer, LevelListFormatter),
        None,
    )
}
