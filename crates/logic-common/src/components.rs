//! Cycle detection over dependency graphs.
//!
//! Graphs are given as a mapping from each vertex to its outgoing edges.
//! Vertices only mentioned as edge targets are treated as having no outgoing
//! edges. [`is_acyclic`] is a cheap check which should be tried first; only if
//! it fails does [`cycles`] need to run Tarjan's algorithm to find the actual
//! strongly connected components.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use log::trace;

/// Check whether the graph contains no cycles, by repeatedly removing vertices
/// without incoming edges (Kahn's algorithm).
pub fn is_acyclic<T>(graph: &HashMap<T, Vec<T>>) -> bool
where
    T: Copy + Eq + Hash,
{
    let mut incoming: HashMap<T, usize> = HashMap::new();
    for (vertex, edges) in graph {
        incoming.entry(*vertex).or_default();
        for edge in edges {
            *incoming.entry(*edge).or_default() += 1;
        }
    }

    let mut ready: Vec<T> = incoming
        .iter()
        .filter(|(_, count)| **count == 0)
        .map(|(vertex, _)| *vertex)
        .collect();

    let mut removed = 0;
    while let Some(vertex) = ready.pop() {
        removed += 1;
        for edge in graph.get(&vertex).into_iter().flatten() {
            let count = incoming
                .get_mut(edge)
                .expect("every edge target has an incoming count");
            *count -= 1;
            if *count == 0 {
                ready.push(*edge);
            }
        }
    }

    removed == incoming.len()
}

/// Compute every strongly connected component in the graph, in reverse
/// topological order.
pub fn find<T>(graph: &HashMap<T, Vec<T>>) -> Vec<HashSet<T>>
where
    T: Copy + Eq + Hash + Ord,
{
    // Visit in a fixed order so the result does not depend on hashing.
    let mut vertices: Vec<_> = graph.keys().copied().collect();
    vertices.sort();

    let mut finder = ComponentFinder::new();
    for vertex in vertices {
        if !finder.indices.contains_key(&vertex) {
            finder.connect(graph, vertex);
        }
    }

    finder.components
}

/// Get only the components that actually form a cycle: those with more than
/// one vertex, and single vertices with an edge to themselves.
pub fn cycles<T>(graph: &HashMap<T, Vec<T>>) -> Vec<HashSet<T>>
where
    T: Copy + Eq + Hash + Ord,
{
    let cycles: Vec<_> = find(graph)
        .into_iter()
        .filter(|component| {
            component.len() > 1
                || component.iter().any(|vertex| {
                    graph
                        .get(vertex)
                        .map_or(false, |edges| edges.contains(vertex))
                })
        })
        .collect();

    trace!("found {} cycles among {} vertices", cycles.len(), graph.len());
    cycles
}

struct ComponentFinder<T> {
    index: usize,

    indices: HashMap<T, usize>,
    lowlinks: HashMap<T, usize>,

    stack: Vec<T>,
    on_stack: HashSet<T>,

    components: Vec<HashSet<T>>,
}

impl<T> ComponentFinder<T>
where
    T: Copy + Eq + Hash,
{
    fn new() -> Self {
        Self {
            index: 0,
            indices: HashMap::new(),
            lowlinks: HashMap::new(),
            stack: Vec::new(),
            on_stack: HashSet::new(),
            components: Vec::new(),
        }
    }

    fn lowlink(&self, vertex: &T) -> usize {
        self.lowlinks[vertex]
    }

    fn connect(&mut self, graph: &HashMap<T, Vec<T>>, vertex: T) {
        self.indices.insert(vertex, self.index);
        self.lowlinks.insert(vertex, self.index);
        self.index += 1;

        self.stack.push(vertex);
        self.on_stack.insert(vertex);

        for child in graph.get(&vertex).into_iter().flatten() {
            if !self.indices.contains_key(child) {
                self.connect(graph, *child);
                let lowlink = self.lowlink(&vertex).min(self.lowlink(child));
                self.lowlinks.insert(vertex, lowlink);
            } else if self.on_stack.contains(child) {
                let lowlink = self.lowlink(&vertex).min(self.indices[child]);
                self.lowlinks.insert(vertex, lowlink);
            }
        }

        if self.lowlinks.get(&vertex) == self.indices.get(&vertex) {
            let mut component = HashSet::new();
            while let Some(child) = self.stack.pop() {
                self.on_stack.remove(&child);
                component.insert(child);

                if child == vertex {
                    break;
                }
            }

            self.components.push(component);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{HashMap, HashSet};

    use pretty_assertions::assert_eq;

    use super::{cycles, find, is_acyclic};

    fn graph(edges: &[(usize, &[usize])]) -> HashMap<usize, Vec<usize>> {
        edges
            .iter()
            .map(|(vertex, edges)| (*vertex, edges.to_vec()))
            .collect()
    }

    #[test]
    fn chain_is_acyclic() {
        let graph = graph(&[(0, &[1]), (1, &[2]), (2, &[])]);
        assert!(is_acyclic(&graph));
        assert!(cycles(&graph).is_empty());
        assert_eq!(3, find(&graph).len());
    }

    #[test]
    fn dangling_edges_are_leaves() {
        let graph = graph(&[(0, &[1, 2])]);
        assert!(is_acyclic(&graph));
    }

    #[test]
    fn self_loop_is_a_cycle() {
        let graph = graph(&[(0, &[0]), (1, &[0])]);
        assert!(!is_acyclic(&graph));
        assert_eq!(vec![HashSet::from([0])], cycles(&graph));
    }

    #[test]
    fn finds_separate_cycles() {
        let graph = graph(&[
            (0, &[1]),
            (1, &[0]),
            (2, &[3]),
            (3, &[4]),
            (4, &[2]),
            (5, &[0, 2]),
        ]);

        assert!(!is_acyclic(&graph));

        let mut found = cycles(&graph);
        found.sort_by_key(|component| component.len());
        assert_eq!(
            vec![HashSet::from([0, 1]), HashSet::from([2, 3, 4])],
            found
        );
    }
}
