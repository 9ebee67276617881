//! 先修关系图检查
//!
//! 存储层只把先修关系当作普通的有向邻接表，不强制无环。
//! 开启 `catalog.reject_requirement_cycles` 时，在写入前用这里的检查拒绝成环的边集。

use std::collections::HashMap;

/// 有向图：subject -> 它依赖的 requirement 列表
#[derive(Debug, Default)]
pub struct RequirementGraph<'a> {
    edges: HashMap<&'a str, Vec<&'a str>>,
}

impl<'a> RequirementGraph<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_edge(&mut self, subject: &'a str, requirement: &'a str) {
        self.edges.entry(subject).or_default().push(requirement);
    }

    /// 是否存在环（自环也算）
    pub fn has_cycle(&self) -> bool {
        // 0: 未访问, 1: 在当前路径上, 2: 已完成
        let mut state: HashMap<&str, u8> = HashMap::with_capacity(self.edges.len());

        for &start in self.edges.keys() {
            if state.get(start).copied().unwrap_or(0) != 0 {
                continue;
            }
            // 显式栈，避免深图递归
            let mut stack: Vec<(&str, usize)> = vec![(start, 0)];
            state.insert(start, 1);

            while let Some((node, next)) = stack.pop() {
                let children = self.edges.get(node).map(Vec::as_slice).unwrap_or(&[]);
                if next < children.len() {
                    stack.push((node, next + 1));
                    let child = children[next];
                    match state.get(child).copied().unwrap_or(0) {
                        1 => return true,
                        0 => {
                            state.insert(child, 1);
                            stack.push((child, 0));
                        }
                        _ => {}
                    }
                } else {
                    state.insert(node, 2);
                }
            }
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_has_no_cycle() {
        let mut graph = RequirementGraph::new();
        graph.add_edge("c", "b");
        graph.add_edge("b", "a");
        assert!(!graph.has_cycle());
    }

    #[test]
    fn test_diamond_has_no_cycle() {
        let mut graph = RequirementGraph::new();
        graph.add_edge("d", "b");
        graph.add_edge("d", "c");
        graph.add_edge("b", "a");
        graph.add_edge("c", "a");
        assert!(!graph.has_cycle());
    }

    #[test]
    fn test_self_loop_is_cycle() {
        let mut graph = RequirementGraph::new();
        graph.add_edge("a", "a");
        assert!(graph.has_cycle());
    }

    #[test]
    fn test_long_cycle_detected() {
        let mut graph = RequirementGraph::new();
        graph.add_edge("a", "b");
        graph.add_edge("b", "c");
        graph.add_edge("c", "a");
        graph.add_edge("x", "a");
        assert!(graph.has_cycle());
    }
}
