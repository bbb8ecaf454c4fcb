use rand::rngs::OsRng;
use rand::{Rng, RngCore, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;
use symtree_expr::{heads, Expr, Node, Symbol};
use symtree_position::{Path, Step};

use crate::leaf::{gen_integer, gen_real, gen_string, gen_symbol};

const HEADS: &[&str] = &["f", "g", "h", "Plus", "Times"];

/// Kind of a generated node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Integer,
    Real,
    String,
    Symbol,
    List,
    Composite,
    Association,
}

/// Relative weights of the node kinds.
#[derive(Debug, Clone)]
pub struct NodeOdds {
    pub integer: u32,
    pub real: u32,
    pub string: u32,
    pub symbol: u32,
    pub list: u32,
    pub composite: u32,
    pub association: u32,
}

impl Default for NodeOdds {
    fn default() -> Self {
        Self {
            integer: 6,
            real: 2,
            string: 4,
            symbol: 4,
            list: 3,
            composite: 2,
            association: 2,
        }
    }
}

impl NodeOdds {
    fn weights(&self) -> [(NodeKind, u32); 7] {
        [
            (NodeKind::Integer, self.integer),
            (NodeKind::Real, self.real),
            (NodeKind::String, self.string),
            (NodeKind::Symbol, self.symbol),
            (NodeKind::List, self.list),
            (NodeKind::Composite, self.composite),
            (NodeKind::Association, self.association),
        ]
    }
}

/// Kind of the root container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RootNode {
    #[default]
    List,
    Composite,
    Association,
}

#[derive(Debug, Clone)]
pub struct RandomExprOptions {
    pub root: RootNode,
    /// Nodes added below the root.
    pub node_count: usize,
    pub odds: NodeOdds,
    /// Fixed seed; a fresh one is drawn from the OS otherwise.
    pub seed: Option<u64>,
}

impl Default for RandomExprOptions {
    fn default() -> Self {
        Self {
            root: RootNode::List,
            node_count: 24,
            odds: NodeOdds::default(),
            seed: None,
        }
    }
}

/// Tree under construction. Association children carry their key.
#[derive(Debug)]
enum Growing {
    Leaf(Expr),
    Ordered { head: Symbol, args: Vec<Growing> },
    Association(Vec<(String, Growing)>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Seg {
    Index(usize),
    Key(String),
}

/// Random expression generator.
///
/// Nodes are added one at a time to a randomly chosen container, as in a
/// document that grows by random inserts. Every container's position is
/// tracked so tests can edit at paths that are known to exist.
///
/// ```
/// use symtree_random::{RandomExpr, RandomExprOptions};
///
/// let opts = RandomExprOptions { seed: Some(42), ..Default::default() };
/// let (tree, positions) = RandomExpr::generate_with_positions(opts.clone());
/// assert_eq!(tree, RandomExpr::generate(opts));
/// assert!(positions[0].is_empty());
/// ```
pub struct RandomExpr {
    opts: RandomExprOptions,
    rng: Xoshiro256StarStar,
    root: Growing,
    containers: Vec<Vec<Seg>>,
    next_key: usize,
}

impl RandomExpr {
    pub fn generate(opts: RandomExprOptions) -> Expr {
        Self::new(opts).create().0
    }

    /// Tree plus the path of every container in it, root (`[]`) first.
    pub fn generate_with_positions(opts: RandomExprOptions) -> (Expr, Vec<Path>) {
        Self::new(opts).create()
    }

    fn new(opts: RandomExprOptions) -> Self {
        let seed = opts.seed.unwrap_or_else(|| OsRng.next_u64());
        let mut rng = Xoshiro256StarStar::seed_from_u64(seed);
        let root = match opts.root {
            RootNode::List => Growing::Ordered {
                head: Symbol::new(heads::LIST),
                args: Vec::new(),
            },
            RootNode::Composite => Growing::Ordered {
                head: Symbol::new(HEADS[rng.gen_range(0..HEADS.len())]),
                args: Vec::new(),
            },
            RootNode::Association => Growing::Association(Vec::new()),
        };
        Self {
            opts,
            rng,
            root,
            containers: vec![Vec::new()],
            next_key: 0,
        }
    }

    fn create(mut self) -> (Expr, Vec<Path>) {
        for _ in 0..self.opts.node_count {
            self.add_node();
        }
        let positions = self.containers.iter().map(|segs| to_path(segs)).collect();
        (freeze(self.root), positions)
    }

    fn add_node(&mut self) {
        let container_idx = self.rng.gen_range(0..self.containers.len());
        let container_path = self.containers[container_idx].clone();
        let kind = self.pick_kind();
        let node = self.generate_node(kind);
        let is_container = matches!(node, Growing::Ordered { .. } | Growing::Association(_));

        let key = format!("k{}", self.next_key);
        let Some(container) = get_mut_by_path(&mut self.root, &container_path) else {
            return;
        };
        let seg = match container {
            Growing::Ordered { args, .. } => {
                let index = self.rng.gen_range(0..=args.len());
                args.insert(index, node);
                Seg::Index(index)
            }
            Growing::Association(rules) => {
                self.next_key += 1;
                rules.push((key.clone(), node));
                Seg::Key(key)
            }
            Growing::Leaf(_) => return,
        };
        if let Seg::Index(index) = seg {
            self.adjust_indices_after_insert(&container_path, index);
        }
        if is_container {
            let mut new_path = container_path;
            new_path.push(seg);
            self.containers.push(new_path);
        }
    }

    fn adjust_indices_after_insert(&mut self, base_path: &[Seg], inserted_index: usize) {
        for path in &mut self.containers {
            if path.len() <= base_path.len() || !path.starts_with(base_path) {
                continue;
            }
            if let Some(Seg::Index(idx)) = path.get_mut(base_path.len()) {
                if *idx >= inserted_index {
                    *idx += 1;
                }
            }
        }
    }

    fn pick_kind(&mut self) -> NodeKind {
        let weights = self.opts.odds.weights();
        let total: u32 = weights.iter().map(|(_, w)| w).sum();
        if total == 0 {
            return NodeKind::Integer;
        }
        let mut pick = self.rng.gen_range(0..total);
        for (kind, weight) in weights {
            if pick < weight {
                return kind;
            }
            pick -= weight;
        }
        NodeKind::Integer
    }

    fn generate_node(&mut self, kind: NodeKind) -> Growing {
        let rng = &mut self.rng;
        match kind {
            NodeKind::Integer => Growing::Leaf(gen_integer(rng)),
            NodeKind::Real => Growing::Leaf(gen_real(rng)),
            NodeKind::String => Growing::Leaf(gen_string(rng)),
            NodeKind::Symbol => Growing::Leaf(gen_symbol(rng)),
            NodeKind::List => Growing::Ordered {
                head: Symbol::new(heads::LIST),
                args: Vec::new(),
            },
            NodeKind::Composite => Growing::Ordered {
                head: Symbol::new(HEADS[rng.gen_range(0..HEADS.len())]),
                args: Vec::new(),
            },
            NodeKind::Association => Growing::Association(Vec::new()),
        }
    }
}

fn get_mut_by_path<'a>(node: &'a mut Growing, path: &[Seg]) -> Option<&'a mut Growing> {
    let Some((first, rest)) = path.split_first() else {
        return Some(node);
    };
    match (first, node) {
        (Seg::Index(i), Growing::Ordered { args, .. }) => args
            .get_mut(*i)
            .and_then(|next| get_mut_by_path(next, rest)),
        (Seg::Key(key), Growing::Association(rules)) => rules
            .iter_mut()
            .find(|(k, _)| k == key)
            .and_then(|(_, next)| get_mut_by_path(next, rest)),
        _ => None,
    }
}

fn to_path(segs: &[Seg]) -> Path {
    segs.iter()
        .map(|seg| match seg {
            Seg::Index(i) => Step::Index(*i as i64 + 1),
            Seg::Key(key) => Step::key(key.clone()),
        })
        .collect()
}

fn freeze(node: Growing) -> Expr {
    match node {
        Growing::Leaf(expr) => expr,
        Growing::Ordered { head, args } => {
            Expr::composite(head, args.into_iter().map(freeze).collect())
        }
        // Keys come from a counter and are unique.
        Growing::Association(rules) => Expr::from_node(Node::Association(
            rules
                .into_iter()
                .map(|(key, value)| Expr::rule(Expr::string(key), freeze(value)))
                .collect(),
        )),
    }
}
