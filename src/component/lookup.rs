//! 按名称在层级中查找组件
//!
//! 所有查询都以深度优先先序遍历对象自身及其后代，对象自身也参与匹配。
//! 名称指组件所在 GameObject 的名称，必须完全相等（区分大小写）。

use super::{Component, GameObject};
use crate::core::error::{Result, UnitoolzError};

impl GameObject {
    /// 获取自身及所有后代上指定类型的组件
    pub fn get_components_in_children<T: Component>(&self, include_inactive: bool) -> Vec<&T> {
        let mut found = Vec::new();
        self.visit(include_inactive, &mut |go, _| found.extend(go.components_of::<T>()));
        found
    }

    /// 获取名称为 `name` 的对象上所有指定类型的组件
    pub fn get_named_components_in_children<T: Component>(
        &self,
        name: &str,
        include_inactive: bool,
    ) -> Vec<&T> {
        let mut found = Vec::new();
        self.visit(include_inactive, &mut |go, _| {
            if go.name() == name {
                found.extend(go.components_of::<T>());
            }
        });
        found
    }

    /// 查找第一个名称为 `name` 的对象上的指定类型组件
    pub fn find_named_component_in_children<T: Component>(
        &self,
        name: &str,
        include_inactive: bool,
    ) -> Option<&T> {
        self.find_map(include_inactive, &mut |go| {
            if go.name() == name {
                go.components_of::<T>().next()
            } else {
                None
            }
        })
    }

    /// 与 [`find_named_component_in_children`](GameObject::find_named_component_in_children) 相同，
    /// 找不到时返回 `ComponentNotFound` 错误
    pub fn get_named_component_in_children<T: Component>(
        &self,
        name: &str,
        include_inactive: bool,
    ) -> Result<&T> {
        self.find_named_component_in_children::<T>(name, include_inactive)
            .ok_or_else(|| UnitoolzError::ComponentNotFound {
                component: std::any::type_name::<T>(),
                name: name.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Collider(u32);
    impl Component for Collider {}

    struct Marker;
    impl Component for Marker {}

    fn ids(colliders: &[&Collider]) -> Vec<u32> {
        colliders.iter().map(|c| c.0).collect()
    }

    /// Root
    /// ├─ Hand [1]
    /// │  └─ Sword [2]
    /// ├─ Sword [3]（未激活）
    /// └─ Back [Marker]
    ///    └─ Sword [4, 5]
    fn rig() -> GameObject {
        let mut stored = GameObject::new("Sword").with_component(Collider(3));
        stored.active = false;

        GameObject::new("Root")
            .with_child(
                GameObject::new("Hand")
                    .with_component(Collider(1))
                    .with_child(GameObject::new("Sword").with_component(Collider(2))),
            )
            .with_child(stored)
            .with_child(
                GameObject::new("Back").with_component(Marker).with_child(
                    GameObject::new("Sword")
                        .with_component(Collider(4))
                        .with_component(Marker)
                        .with_component(Collider(5)),
                ),
            )
    }

    #[test]
    fn test_components_in_children() {
        let root = rig();
        assert_eq!(ids(&root.get_components_in_children::<Collider>(false)), vec![1, 2, 4, 5]);
        assert_eq!(ids(&root.get_components_in_children::<Collider>(true)), vec![1, 2, 3, 4, 5]);
        assert_eq!(root.get_components_in_children::<Marker>(false).len(), 2);
    }

    #[test]
    fn test_find_first_named() {
        let root = rig();
        assert_eq!(root.find_named_component_in_children::<Collider>("Sword", false), Some(&Collider(2)));
        assert_eq!(root.find_named_component_in_children::<Collider>("Back", false), None);
        // 第一个 Sword 上没有 Marker，继续向后查找
        assert!(root.find_named_component_in_children::<Marker>("Sword", false).is_some());
    }

    #[test]
    fn test_all_named() {
        let root = rig();
        assert_eq!(ids(&root.get_named_components_in_children::<Collider>("Sword", false)), vec![2, 4, 5]);
        assert_eq!(ids(&root.get_named_components_in_children::<Collider>("Sword", true)), vec![2, 3, 4, 5]);
    }

    #[test]
    fn test_name_must_match_exactly() {
        let root = rig();
        assert!(root.get_named_components_in_children::<Collider>("sword", true).is_empty());
        assert!(root.get_named_components_in_children::<Collider>("Swor", true).is_empty());
    }

    #[test]
    fn test_self_is_searched() {
        let root = GameObject::new("Sword")
            .with_component(Collider(0))
            .with_child(GameObject::new("Sword").with_component(Collider(1)));

        assert_eq!(root.find_named_component_in_children::<Collider>("Sword", false), Some(&Collider(0)));
    }

    #[test]
    fn test_inactive_root_hides_everything() {
        let mut root = rig();
        root.active = false;

        assert!(root.get_components_in_children::<Collider>(false).is_empty());
        assert_eq!(root.get_components_in_children::<Collider>(true).len(), 5);
    }

    #[test]
    fn test_get_named_missing_is_error() {
        let root = rig();
        let err = root.get_named_component_in_children::<Collider>("Shield", true).unwrap_err();

        match &err {
            UnitoolzError::ComponentNotFound { component, name } => {
                assert!(component.ends_with("Collider"));
                assert_eq!(name, "Shield");
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(err.to_string().contains("'Shield'"));
    }

    #[test]
    fn test_get_named_found() {
        let root = rig();
        let collider = root.get_named_component_in_children::<Collider>("Hand", false).unwrap();
        assert_eq!(collider.0, 1);
    }
}
