//! Path-based prize-collecting Steiner tree approximation.
//!
//! The solve runs in three phases:
//!
//! 1. **Connect**: a multi-source Dijkstra partitions the graph into
//!    nearest-terminal regions (Mehlhorn's construction); where two
//!    regions touch, the touching edge induces a terminal-to-terminal
//!    distance. A Kruskal MST over those distances is expanded back into
//!    original-graph paths, and a second Kruskal pass keeps the expanded
//!    edge set acyclic.
//! 2. **Prune**: per tree, the configured pruning strategy cuts every
//!    edge whose subtree does not pay for it (strong pruning) or strips
//!    zero-prize leaves. Cut edges split the tree into cluster
//!    candidates.
//! 3. **Select**: unrooted solves keep the `num_clusters` candidates
//!    with the best net worth; rooted solves keep the root's candidate.
//!
//! Every phase orders its work by node/edge index, so identical inputs
//! produce identical solutions.

use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet, BinaryHeap};

use ordered_float::OrderedFloat;
use petgraph::unionfind::UnionFind;
use tracing::debug;

use arbor_core::error::ArborResult;
use arbor_core::traits::{PruningStrategy, SteinerInput, SteinerSolution, SteinerSolver};

/// Default prize-collecting Steiner tree solver.
#[derive(Debug, Clone, Default)]
pub struct GwSolver;

impl GwSolver {
    /// Create a new solver.
    pub fn new() -> Self {
        Self
    }
}

impl SteinerSolver for GwSolver {
    fn solve(&self, input: &SteinerInput) -> ArborResult<SteinerSolution> {
        input.validate()?;
        let n = input.node_count();

        // Terminals: positive-prize nodes, plus the root if set.
        let mut terminals: Vec<usize> = (0..n).filter(|&i| input.prizes[i] > 0.0).collect();
        if let Some(root) = input.root {
            if !terminals.contains(&root) {
                terminals.push(root);
                terminals.sort_unstable();
            }
        }
        if terminals.is_empty() {
            return Ok(SteinerSolution::default());
        }

        let adjacency = build_adjacency(n, &input.edges);
        let voronoi = nearest_terminal_partition(input, &adjacency, &terminals);
        let expanded = connect_terminals(input, &voronoi, &terminals);
        let tree_edges = spanning_forest(input, n, &expanded);
        let trees = split_components(input, &tree_edges, &terminals);

        let mut candidates: Vec<Component> = trees
            .into_iter()
            .flat_map(|tree| prune_tree(input, tree))
            .collect();

        let selected = match input.root {
            Some(root) => candidates
                .into_iter()
                .filter(|c| c.nodes.contains(&root))
                .collect::<Vec<_>>(),
            None => {
                candidates.sort_by_key(|c| {
                    (
                        Reverse(OrderedFloat(c.net_worth)),
                        c.nodes.first().copied().unwrap_or(usize::MAX),
                    )
                });
                candidates.truncate(input.num_clusters);
                candidates
            }
        };

        let mut nodes = BTreeSet::new();
        let mut edges = BTreeSet::new();
        for component in selected {
            nodes.extend(component.nodes);
            edges.extend(component.edges);
        }

        debug!(
            terminals = terminals.len(),
            nodes = nodes.len(),
            edges = edges.len(),
            "pcst solve finished"
        );

        Ok(SteinerSolution {
            nodes: nodes.into_iter().collect(),
            edges: edges.into_iter().collect(),
        })
    }

    fn name(&self) -> &str {
        "gw"
    }
}

/// Adjacency list: node -> (neighbor, edge index).
fn build_adjacency(n: usize, edges: &[(usize, usize)]) -> Vec<Vec<(usize, usize)>> {
    let mut adjacency = vec![Vec::new(); n];
    for (index, &(u, v)) in edges.iter().enumerate() {
        adjacency[u].push((v, index));
        adjacency[v].push((u, index));
    }
    adjacency
}

/// Nearest-terminal partition from a multi-source Dijkstra.
struct Voronoi {
    dist: Vec<f64>,
    nearest: Vec<Option<usize>>,
    pred_node: Vec<Option<usize>>,
    pred_edge: Vec<Option<usize>>,
}

fn nearest_terminal_partition(
    input: &SteinerInput,
    adjacency: &[Vec<(usize, usize)>],
    terminals: &[usize],
) -> Voronoi {
    let n = input.node_count();
    let mut dist = vec![f64::INFINITY; n];
    let mut nearest = vec![None; n];
    let mut pred_node = vec![None; n];
    let mut pred_edge = vec![None; n];

    let mut heap = BinaryHeap::new();
    for &t in terminals {
        dist[t] = 0.0;
        nearest[t] = Some(t);
        heap.push(Reverse((OrderedFloat(0.0), t)));
    }

    while let Some(Reverse((OrderedFloat(d), v))) = heap.pop() {
        if d > dist[v] {
            continue;
        }
        for &(w, edge) in &adjacency[v] {
            let candidate = d + input.costs[edge];
            if candidate < dist[w] {
                dist[w] = candidate;
                nearest[w] = nearest[v];
                pred_node[w] = Some(v);
                pred_edge[w] = Some(edge);
                heap.push(Reverse((OrderedFloat(candidate), w)));
            }
        }
    }

    Voronoi {
        dist,
        nearest,
        pred_node,
        pred_edge,
    }
}

/// Build the terminal-distance MST and expand its edges back into
/// original-graph paths. Returns the expanded edge-index set.
fn connect_terminals(
    input: &SteinerInput,
    voronoi: &Voronoi,
    terminals: &[usize],
) -> BTreeSet<usize> {
    let position: BTreeMap<usize, usize> = terminals
        .iter()
        .enumerate()
        .map(|(pos, &t)| (t, pos))
        .collect();

    // Terminal-graph edges where two nearest-terminal regions touch.
    let mut bridges: Vec<(OrderedFloat<f64>, usize, usize, usize)> = Vec::new();
    for (edge, &(u, v)) in input.edges.iter().enumerate() {
        if let (Some(tu), Some(tv)) = (voronoi.nearest[u], voronoi.nearest[v]) {
            if tu != tv {
                let weight = voronoi.dist[u] + input.costs[edge] + voronoi.dist[v];
                let (a, b) = (tu.min(tv), tu.max(tv));
                bridges.push((OrderedFloat(weight), a, b, edge));
            }
        }
    }
    bridges.sort_unstable();

    let mut union_find = UnionFind::new(terminals.len());
    let mut expanded = BTreeSet::new();
    for (_, a, b, edge) in bridges {
        if union_find.union(position[&a], position[&b]) {
            expanded.insert(edge);
            let (u, v) = input.edges[edge];
            walk_to_terminal(voronoi, u, &mut expanded);
            walk_to_terminal(voronoi, v, &mut expanded);
        }
    }
    expanded
}

/// Follow the Dijkstra predecessor chain down to the region's terminal,
/// collecting the traversed edges.
fn walk_to_terminal(voronoi: &Voronoi, start: usize, out: &mut BTreeSet<usize>) {
    let mut node = start;
    while let Some(edge) = voronoi.pred_edge[node] {
        out.insert(edge);
        node = voronoi.pred_node[node].expect("predecessor node set with edge");
    }
}

/// Expanded paths can overlap and close cycles; a Kruskal pass over the
/// expanded edges keeps a minimum-cost acyclic subset.
fn spanning_forest(input: &SteinerInput, n: usize, expanded: &BTreeSet<usize>) -> BTreeSet<usize> {
    let mut ordered: Vec<usize> = expanded.iter().copied().collect();
    ordered.sort_by_key(|&e| (OrderedFloat(input.costs[e]), e));

    let mut union_find = UnionFind::new(n);
    let mut forest = BTreeSet::new();
    for edge in ordered {
        let (u, v) = input.edges[edge];
        if union_find.union(u, v) {
            forest.insert(edge);
        }
    }
    forest
}

/// A connected cluster candidate.
#[derive(Debug)]
struct Component {
    /// Sorted ascending.
    nodes: Vec<usize>,
    /// Sorted ascending.
    edges: Vec<usize>,
    net_worth: f64,
}

/// Split the forest (plus isolated terminals) into trees.
fn split_components(
    input: &SteinerInput,
    tree_edges: &BTreeSet<usize>,
    terminals: &[usize],
) -> Vec<Component> {
    let nodes: BTreeSet<usize> = terminals
        .iter()
        .copied()
        .chain(tree_edges.iter().flat_map(|&e| {
            let (u, v) = input.edges[e];
            [u, v]
        }))
        .collect();
    group_by_connectivity(input, &nodes, tree_edges)
}

/// Group `nodes` into connected components over the given edge subset,
/// computing each component's net worth.
fn group_by_connectivity(
    input: &SteinerInput,
    nodes: &BTreeSet<usize>,
    edges: &BTreeSet<usize>,
) -> Vec<Component> {
    let mut adjacency: BTreeMap<usize, Vec<(usize, usize)>> = BTreeMap::new();
    for &edge in edges {
        let (u, v) = input.edges[edge];
        adjacency.entry(u).or_default().push((v, edge));
        adjacency.entry(v).or_default().push((u, edge));
    }

    let mut components = Vec::new();
    let mut seen = BTreeSet::new();
    for &start in nodes {
        if seen.contains(&start) {
            continue;
        }
        let mut component_nodes = Vec::new();
        let mut component_edges = BTreeSet::new();
        let mut stack = vec![start];
        seen.insert(start);
        while let Some(v) = stack.pop() {
            component_nodes.push(v);
            if let Some(neighbors) = adjacency.get(&v) {
                for &(w, edge) in neighbors {
                    component_edges.insert(edge);
                    if seen.insert(w) {
                        stack.push(w);
                    }
                }
            }
        }
        component_nodes.sort_unstable();
        let prize: f64 = component_nodes.iter().map(|&v| input.prizes[v]).sum();
        let cost: f64 = component_edges.iter().map(|&e| input.costs[e]).sum();
        components.push(Component {
            nodes: component_nodes,
            edges: component_edges.into_iter().collect(),
            net_worth: prize - cost,
        });
    }
    components
}

/// Apply the configured pruning strategy to one tree. Cut edges split
/// the tree; every resulting piece is a cluster candidate.
fn prune_tree(input: &SteinerInput, tree: Component) -> Vec<Component> {
    match input.pruning {
        PruningStrategy::None => vec![tree],
        PruningStrategy::Simple => vec![simple_prune(input, tree)],
        PruningStrategy::Gw | PruningStrategy::Strong => bottom_up_prune(input, tree),
    }
}

/// Whether a subtree of the given worth keeps its connecting edge.
///
/// Strong pruning demands the subtree pay the full edge cost (net-worth
/// maximizing); GW moat pruning only asks the subtree to cover its half
/// of the edge's moat, which keeps marginal merges and so favors a
/// single connected result.
fn keeps_edge(pruning: PruningStrategy, subtree_worth: f64, cost: f64) -> bool {
    match pruning {
        PruningStrategy::Strong => subtree_worth - cost > 0.0,
        _ => subtree_worth > cost / 2.0,
    }
}

/// Iteratively strip zero-prize leaves (never the root).
fn simple_prune(input: &SteinerInput, tree: Component) -> Component {
    let mut nodes: BTreeSet<usize> = tree.nodes.iter().copied().collect();
    let mut edges: BTreeSet<usize> = tree.edges.iter().copied().collect();

    loop {
        let mut degree: BTreeMap<usize, usize> = nodes.iter().map(|&v| (v, 0)).collect();
        for &edge in &edges {
            let (u, v) = input.edges[edge];
            *degree.get_mut(&u).expect("endpoint in tree") += 1;
            *degree.get_mut(&v).expect("endpoint in tree") += 1;
        }
        let removable: Vec<usize> = nodes
            .iter()
            .copied()
            .filter(|&v| degree[&v] <= 1 && input.prizes[v] == 0.0 && input.root != Some(v))
            .collect();
        if removable.is_empty() {
            break;
        }
        for v in removable {
            nodes.remove(&v);
            edges.retain(|&e| {
                let (a, b) = input.edges[e];
                a != v && b != v
            });
        }
    }

    let prize: f64 = nodes.iter().map(|&v| input.prizes[v]).sum();
    let cost: f64 = edges.iter().map(|&e| input.costs[e]).sum();
    Component {
        nodes: nodes.into_iter().collect(),
        edges: edges.into_iter().collect(),
        net_worth: prize - cost,
    }
}

/// Root the tree, walk it bottom-up, and cut every edge its subtree
/// does not justify under the configured rule. The cut pieces each
/// become their own cluster candidate; worthless isolated Steiner nodes
/// are discarded.
fn bottom_up_prune(input: &SteinerInput, tree: Component) -> Vec<Component> {
    // Root at the given root when present, else the best-prize node
    // (ties to the lowest index).
    let root = match input.root {
        Some(r) if tree.nodes.contains(&r) => r,
        _ => tree
            .nodes
            .iter()
            .copied()
            .max_by_key(|&v| (OrderedFloat(input.prizes[v]), Reverse(v)))
            .expect("tree is non-empty"),
    };

    let mut adjacency: BTreeMap<usize, Vec<(usize, usize)>> = BTreeMap::new();
    for &edge in &tree.edges {
        let (u, v) = input.edges[edge];
        adjacency.entry(u).or_default().push((v, edge));
        adjacency.entry(v).or_default().push((u, edge));
    }

    // Iterative DFS order with parent links.
    let mut order = Vec::with_capacity(tree.nodes.len());
    let mut parent: BTreeMap<usize, (usize, usize)> = BTreeMap::new();
    let mut visited = BTreeSet::new();
    let mut stack = vec![root];
    visited.insert(root);
    while let Some(v) = stack.pop() {
        order.push(v);
        if let Some(neighbors) = adjacency.get(&v) {
            for &(w, edge) in neighbors {
                if visited.insert(w) {
                    parent.insert(w, (v, edge));
                    stack.push(w);
                }
            }
        }
    }

    // Bottom-up net worth; an edge survives only when its subtree
    // justifies it under the configured rule.
    let mut net_worth: BTreeMap<usize, f64> =
        order.iter().map(|&v| (v, input.prizes[v])).collect();
    let mut kept_edges = BTreeSet::new();
    for &v in order.iter().rev() {
        if let Some(&(p, edge)) = parent.get(&v) {
            if keeps_edge(input.pruning, net_worth[&v], input.costs[edge]) {
                let contribution = net_worth[&v] - input.costs[edge];
                *net_worth.get_mut(&p).expect("parent visited") += contribution;
                kept_edges.insert(edge);
            }
        }
    }

    // Each connectivity group over the surviving edges is a candidate;
    // cut-off zero-prize Steiner nodes are dropped (the root never is).
    let all_nodes: BTreeSet<usize> = tree.nodes.iter().copied().collect();
    group_by_connectivity(input, &all_nodes, &kept_edges)
        .into_iter()
        .filter(|c| {
            c.net_worth > 0.0 || input.root.map_or(false, |r| c.nodes.contains(&r))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solve(input: &SteinerInput) -> SteinerSolution {
        GwSolver::new().solve(input).unwrap()
    }

    #[test]
    fn test_empty_prizes_give_empty_solution() {
        let input = SteinerInput::new(vec![(0, 1)], vec![0.0, 0.0], vec![1.0]);
        assert_eq!(solve(&input), SteinerSolution::default());
    }

    #[test]
    fn test_connects_profitable_path() {
        // 0 -1- 1 -1- 2 with prizes on the ends: worth connecting.
        let input = SteinerInput::new(
            vec![(0, 1), (1, 2)],
            vec![3.0, 0.0, 3.0],
            vec![1.0, 1.0],
        );
        let solution = solve(&input);
        assert_eq!(solution.nodes, vec![0, 1, 2]);
        assert_eq!(solution.edges, vec![0, 1]);
    }

    #[test]
    fn test_prunes_unprofitable_connection() {
        // Connecting either far terminal costs 20 for a prize of 2.
        let input = SteinerInput::new(
            vec![(0, 1), (1, 2)],
            vec![2.0, 0.0, 2.0],
            vec![10.0, 10.0],
        );
        let solution = solve(&input);
        assert_eq!(solution.nodes, vec![0]);
        assert!(solution.edges.is_empty());
    }

    #[test]
    fn test_prefers_cheap_detour() {
        // Direct edge 0-2 costs 5; the detour through 1 costs 2.
        let input = SteinerInput::new(
            vec![(0, 2), (0, 1), (1, 2)],
            vec![3.0, 0.0, 3.0],
            vec![5.0, 1.0, 1.0],
        );
        let solution = solve(&input);
        assert_eq!(solution.nodes, vec![0, 1, 2]);
        assert_eq!(solution.edges, vec![1, 2]);
    }

    #[test]
    fn test_rooted_solve_keeps_root_component() {
        let mut input = SteinerInput::new(
            vec![(0, 1), (1, 2)],
            vec![2.0, 0.0, 0.0],
            vec![0.5, 0.5],
        );
        input.root = Some(2);
        let solution = solve(&input);
        assert_eq!(solution.nodes, vec![0, 1, 2]);
    }

    #[test]
    fn test_rooted_solve_with_zero_prizes_returns_root() {
        let mut input = SteinerInput::new(vec![(0, 1)], vec![0.0, 0.0], vec![1.0]);
        input.root = Some(0);
        let solution = solve(&input);
        assert_eq!(solution.nodes, vec![0]);
        assert!(solution.edges.is_empty());
    }

    #[test]
    fn test_two_clusters_kept_when_requested() {
        // Two valuable nodes, prohibitively expensive to connect.
        let mut input = SteinerInput::new(
            vec![(0, 1), (1, 2)],
            vec![5.0, 0.0, 5.0],
            vec![10.0, 10.0],
        );
        input.num_clusters = 2;
        let solution = solve(&input);
        assert_eq!(solution.nodes, vec![0, 2]);
        assert!(solution.edges.is_empty());
    }

    #[test]
    fn test_disconnected_terminal_survives_as_own_cluster() {
        // Node 3 is in a separate graph component.
        let mut input = SteinerInput::new(
            vec![(0, 1), (1, 2)],
            vec![1.0, 0.0, 1.0, 9.0],
            vec![0.5, 0.5],
        );
        input.num_clusters = 2;
        let solution = solve(&input);
        assert!(solution.nodes.contains(&3));
    }

    #[test]
    fn test_single_cluster_picks_best_net_worth() {
        let input = SteinerInput::new(
            vec![(0, 1), (1, 2)],
            vec![1.0, 0.0, 9.0, 0.0],
            vec![10.0, 10.0],
        );
        let solution = solve(&input);
        assert_eq!(solution.nodes, vec![2]);
    }

    #[test]
    fn test_no_pruning_keeps_full_tree() {
        let mut input = SteinerInput::new(
            vec![(0, 1), (1, 2)],
            vec![2.0, 0.0, 2.0],
            vec![10.0, 10.0],
        );
        input.pruning = PruningStrategy::None;
        let solution = solve(&input);
        assert_eq!(solution.nodes, vec![0, 1, 2]);
        assert_eq!(solution.edges, vec![0, 1]);
    }

    #[test]
    fn test_simple_prune_strips_zero_prize_leaf_chain() {
        // Direct unit test: a path 0-1-2-3 where 2 and 3 carry no prize.
        let input = SteinerInput {
            edges: vec![(0, 1), (1, 2), (2, 3)],
            prizes: vec![1.0, 1.0, 0.0, 0.0],
            costs: vec![0.5, 0.5, 0.5],
            root: None,
            num_clusters: 1,
            pruning: PruningStrategy::Simple,
        };
        let tree = Component {
            nodes: vec![0, 1, 2, 3],
            edges: vec![0, 1, 2],
            net_worth: 0.0,
        };
        let pruned = simple_prune(&input, tree);
        assert_eq!(pruned.nodes, vec![0, 1]);
        assert_eq!(pruned.edges, vec![0]);
    }

    #[test]
    fn test_strong_prunes_marginal_branch_that_gw_keeps() {
        // A prize of 0.9 cannot pay the full unit edge cost but covers
        // its half of the moat.
        let mut input = SteinerInput::new(vec![(0, 1)], vec![1.8, 0.9], vec![1.0]);
        input.pruning = PruningStrategy::Strong;
        let strong = solve(&input);
        assert_eq!(strong.nodes, vec![0]);
        assert!(strong.edges.is_empty());

        input.pruning = PruningStrategy::Gw;
        let gw = solve(&input);
        assert_eq!(gw.nodes, vec![0, 1]);
        assert_eq!(gw.edges, vec![0]);
    }

    #[test]
    fn test_higher_edge_cost_never_selects_more_edges() {
        let edges = vec![(0, 1), (1, 2), (2, 3), (0, 3)];
        let prizes = vec![3.0, 1.0, 3.0, 0.0];
        let cheap = SteinerInput::new(edges.clone(), prizes.clone(), vec![0.1; 4]);
        let dear = SteinerInput::new(edges, prizes, vec![50.0; 4]);
        assert!(solve(&dear).edges.len() <= solve(&cheap).edges.len());
    }

    #[test]
    fn test_deterministic_across_runs() {
        let input = SteinerInput::new(
            vec![(0, 1), (1, 2), (0, 2), (2, 3)],
            vec![1.0, 1.0, 1.0, 1.0],
            vec![1.0, 1.0, 1.0, 1.0],
        );
        let first = solve(&input);
        for _ in 0..5 {
            assert_eq!(solve(&input), first);
        }
    }

    #[test]
    fn test_solution_indices_in_range() {
        let input = SteinerInput::new(
            vec![(0, 1), (1, 2), (2, 3)],
            vec![1.0, 0.0, 0.0, 1.0],
            vec![0.2, 0.2, 0.2],
        );
        let solution = solve(&input);
        assert!(solution.nodes.iter().all(|&v| v < 4));
        assert!(solution.edges.iter().all(|&e| e < 3));
    }
}
