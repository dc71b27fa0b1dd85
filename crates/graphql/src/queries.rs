//! GraphQL documents sent to the platform backend.

pub(crate) const SEARCH_PLAYERS: &str = r#"
query SearchPlayers($search: String!, $limit: Int!) {
  player(
    where: {
      _or: [
        { profile: { username: { _ilike: $search } } }
        { profile: { name: { _ilike: $search } } }
        { ethereumAddress: { _ilike: $search } }
      ]
    }
    order_by: { totalXP: desc }
    limit: $limit
  ) {
    id
    ethereumAddress
    profile {
      username
      name
      profileImageURL
    }
  }
}
"#;

pub(crate) const SEARCH_GUILDS: &str = r#"
query SearchGuilds($search: String!, $limit: Int!) {
  guild(
    where: {
      _or: [{ name: { _ilike: $search } }, { guildname: { _ilike: $search } }]
    }
    limit: $limit
  ) {
    id
    guildname
    name
    logo
  }
}
"#;

pub(crate) const SEARCH_PATRONS: &str = r#"
query SearchPatrons($search: String!, $limit: Int!) {
  player(
    where: {
      _or: [
        { profile: { username: { _ilike: $search } } }
        { ethereumAddress: { _ilike: $search } }
      ]
      token_balances: { pSeedBalance: { _gt: 0 } }
    }
    order_by: { token_balances: { pSeedBalance: desc } }
    limit: $limit
  ) {
    id
    ethereumAddress
    profile {
      username
      name
      profileImageURL
    }
    token_balances {
      pSeedBalance
    }
  }
}
"#;

pub(crate) const SEARCH_QUESTS: &str = r#"
query SearchQuests($search: String!, $limit: Int!) {
  quest(
    where: { title: { _ilike: $search }, status: { _eq: OPEN } }
    order_by: { createdAt: desc }
    limit: $limit
  ) {
    id
    title
    image
  }
}
"#;

pub(crate) const PLAYER_LINKS: &str = r#"
query PlayerLinks($playerId: uuid!) {
  link(where: { playerId: { _eq: $playerId } }) {
    id
    playerId
    name
    url
    type
  }
}
"#;

pub(crate) const ADD_PLAYER_LINK: &str = r#"
mutation AddPlayerLink($playerId: uuid!, $name: String!, $url: String!, $type: LinkType_enum!) {
  insert_link_one(object: { playerId: $playerId, name: $name, url: $url, type: $type }) {
    id
    playerId
    name
    url
    type
  }
}
"#;

pub(crate) const UPDATE_PLAYER_LINK: &str = r#"
mutation UpdatePlayerLink($id: uuid!, $name: String!, $url: String!, $type: LinkType_enum!) {
  update_link_by_pk(pk_columns: { id: $id }, _set: { name: $name, url: $url, type: $type }) {
    id
    playerId
    name
    url
    type
  }
}
"#;

pub(crate) const DELETE_PLAYER_LINK: &str = r#"
mutation DeletePlayerLink($id: uuid!) {
  delete_link(where: { id: { _eq: $id } }) {
    affected_rows
  }
}
"#;

pub(crate) const SUBMIT_GUILD: &str = r#"
mutation SubmitGuild($object: guild_insert_input!) {
  insert_guild_one(object: $object) {
    id
    guildname
    name
    logo
  }
}
"#;
